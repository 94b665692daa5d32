use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tinysql_ast::{
    AggFunc, BinaryOperator, ColumnDef, Direction, OrderByItem, Operand, SelectItem, Value,
    WhereClause,
};

use crate::error::{EngineError, Result};

/// A stored row: one cell per column, in column-index order.
pub type Row = Vec<Value>;

/// A collation function: a three-way comparator returning `<0`, `0`, or `>0`.
pub type Collation = std::sync::Arc<dyn Fn(&Value, &Value) -> i32 + Send + Sync>;

/// An in-memory table: a fixed set of typed, table-qualified columns and a
/// list of rows.
///
/// Column names are stored fully qualified (`table.column`) from the moment
/// the table is created, the way a join's synthesized table needs to
/// disambiguate columns coming from either side.
#[derive(Clone)]
pub struct Table {
    /// The table's own name.
    pub name: String,
    /// Qualified column names, in declaration order.
    pub headers: Vec<String>,
    /// Position of each qualified column name within a row.
    pub positions: HashMap<String, usize>,
    /// Declared type of each column, by position.
    pub types: Vec<ColumnDef>,
    /// Default value of each column, by position.
    pub defaults: HashMap<usize, Value>,
    /// Other table names whose columns an unqualified reference may resolve
    /// against (used by joins and views).
    pub rel_tables: Vec<String>,
    /// The stored rows.
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table from its column definitions.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Result<Self> {
        let name = name.into();
        let mut headers = Vec::with_capacity(columns.len());
        let mut positions = HashMap::with_capacity(columns.len());
        let mut defaults = HashMap::new();
        for (i, col) in columns.iter().enumerate() {
            let qualified = format!("{name}.{}", col.name);
            if positions.insert(qualified.clone(), i).is_some() {
                return Err(EngineError::Query(format!(
                    "{} can't be the column name for multiple columns",
                    col.name
                )));
            }
            headers.push(qualified);
            if let Some(default) = &col.default {
                defaults.insert(i, default.clone());
            }
        }
        Ok(Self {
            name: name.clone(),
            headers,
            positions,
            types: columns,
            defaults,
            rel_tables: vec![name],
            rows: Vec::new(),
        })
    }

    /// Creates a table from already-qualified columns, such as the
    /// synthesized result of a `LEFT OUTER JOIN`.
    pub fn from_parts(
        name: impl Into<String>,
        headers: Vec<String>,
        types: Vec<ColumnDef>,
        defaults: HashMap<usize, Value>,
        rel_tables: Vec<String>,
    ) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            name: name.into(),
            headers,
            positions,
            types,
            defaults,
            rel_tables,
            rows: Vec::new(),
        }
    }

    /// Resolves an unqualified column name against `rel_tables`, returning
    /// the column unchanged if it is already qualified, is `*`, or resolves
    /// against none of the related tables.
    pub fn qualify(&self, column: &str) -> String {
        if column.contains('.') || column == "*" {
            return column.to_string();
        }
        for table in &self.rel_tables {
            let candidate = format!("{table}.{column}");
            if self.positions.contains_key(&candidate) {
                return candidate;
            }
        }
        column.to_string()
    }

    pub(crate) fn position(&self, column: &str) -> Result<usize> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| EngineError::Query(format!("{column} is not a column name in {}", self.name)))
    }

    /// Evaluates a `WHERE` predicate, returning the indices of matching rows.
    ///
    /// `NULL`-aware: `IS`/`IS NOT` are only meaningful against `NULL`, and
    /// every other operator is false whenever the left-hand cell is `NULL`.
    pub fn where_matches(
        &self,
        column: &str,
        op: BinaryOperator,
        value: &Value,
    ) -> Result<Vec<usize>> {
        let column = self.qualify(column);
        let pos = self.position(&column)?;

        let mut matches = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let cell = &row[pos];
            let hit = match op {
                BinaryOperator::Is => value.is_null() && cell.is_null(),
                BinaryOperator::IsNot => value.is_null() && !cell.is_null(),
                BinaryOperator::Gt => {
                    !cell.is_null() && cell.partial_cmp(value) == Some(std::cmp::Ordering::Greater)
                }
                BinaryOperator::Lt => {
                    !cell.is_null() && cell.partial_cmp(value) == Some(std::cmp::Ordering::Less)
                }
                BinaryOperator::Eq => !cell.is_null() && cell == value,
                BinaryOperator::NotEq => !cell.is_null() && cell != value,
            };
            if hit {
                matches.push(i);
            }
        }
        Ok(matches)
    }

    /// Inserts one row per entry of `values`.
    ///
    /// `columns_to_insert` names which column each position in a row fills;
    /// an empty list means every column in declaration order. `all_default`
    /// requests the `DEFAULT VALUES` shortcut: one row built entirely from
    /// column defaults.
    pub fn insert(
        &mut self,
        values: Vec<Row>,
        columns_to_insert: &[String],
        all_default: bool,
    ) -> Result<()> {
        if all_default {
            if self.defaults.len() != self.headers.len() {
                return Err(EngineError::Query(
                    "There aren't default values specified for every column".to_string(),
                ));
            }
            let row: Row = (0..self.headers.len())
                .map(|i| self.defaults.get(&i).cloned().unwrap_or(Value::Null))
                .collect();
            self.rows.push(row);
            return Ok(());
        }

        let rows = if columns_to_insert.is_empty() {
            values
                .into_iter()
                .map(|mut row| {
                    while row.len() < self.headers.len() {
                        let default = self.defaults.get(&row.len()).cloned().unwrap_or(Value::Null);
                        row.push(default);
                    }
                    row
                })
                .collect::<Vec<_>>()
        } else {
            let qualified: Vec<String> = columns_to_insert.iter().map(|c| self.qualify(c)).collect();
            let mut positions = Vec::with_capacity(qualified.len());
            for col in &qualified {
                positions.push(self.position(col)?);
            }
            values
                .into_iter()
                .map(|row| {
                    let mut full = vec![Value::Null; self.headers.len()];
                    for (pos, value) in positions.iter().zip(row) {
                        full[*pos] = value;
                    }
                    for (i, cell) in full.iter_mut().enumerate() {
                        if cell.is_null() {
                            if let Some(default) = self.defaults.get(&i) {
                                *cell = default.clone();
                            }
                        }
                    }
                    full
                })
                .collect()
        };

        for row in &rows {
            if row.len() > self.headers.len() {
                return Err(EngineError::Query(
                    "Must enter values that are equal to or less than the length of the insert columns"
                        .to_string(),
                ));
            }
        }
        for row in &rows {
            for (i, col) in self.types.iter().enumerate() {
                if let Some(cell) = row.get(i) {
                    if !col.data_type.accepts(cell) {
                        return Err(EngineError::Type(format!(
                            "Value: {cell} is not {}",
                            col.data_type
                        )));
                    }
                }
            }
        }

        self.rows.extend(rows);
        Ok(())
    }

    /// Deletes every row matching `where_matches`'s result; `matches` being
    /// the full row-index range means delete everything.
    pub fn delete_rows(&mut self, matches: &[usize]) {
        let keep: HashSet<usize> = matches.iter().copied().collect();
        let mut i = 0;
        self.rows.retain(|_| {
            let keep_row = !keep.contains(&i);
            i += 1;
            keep_row
        });
    }

    /// Assigns `value` to `column` in every row at `matches`.
    ///
    /// Each assignment is type-checked against its own column independently;
    /// an assignment failing its type check does not roll back earlier
    /// assignments already applied to the same statement.
    pub fn assign(&mut self, column: &str, value: &Value, matches: &[usize]) -> Result<()> {
        let qualified = self.qualify(column);
        let pos = self.position(&qualified)?;
        let data_type = self.types[pos].data_type;
        if !data_type.accepts(value) {
            return Err(EngineError::Type(format!("Value: {value} is not {data_type}")));
        }
        for &i in matches {
            self.rows[i][pos] = value.clone();
        }
        Ok(())
    }

    /// Evaluates a full `WHERE` clause, resolving which side is the column
    /// and which is the literal (`col op value` and `value op col` are both
    /// accepted; comparisons involving the latter have their operator
    /// mirrored so `<`/`>` stay correct).
    pub fn matches_filter(&self, filter: &WhereClause) -> Result<Vec<usize>> {
        let (column, op, value) = resolve_where(filter)?;
        self.where_matches(&column, op, &value)
    }

    /// Runs a full `SELECT`: wildcard expansion, filtering, deduplication,
    /// ordering, and aggregation.
    pub fn select(
        &self,
        items: &[SelectItem],
        distinct: bool,
        filter: Option<&WhereClause>,
        order_by: &[OrderByItem],
        collations: &HashMap<String, Collation>,
    ) -> Result<Vec<Row>> {
        if self.rows.is_empty() {
            return Ok(Vec::new());
        }

        let columns = self.expand_items(items)?;

        let mut rows: Vec<Row> = match filter {
            Some(clause) => {
                let matches = self.matches_filter(clause)?;
                matches.into_iter().map(|i| self.rows[i].clone()).collect()
            }
            None => self.rows.clone(),
        };

        if distinct {
            let mut seen = HashSet::new();
            rows.retain(|row| seen.insert(row.clone()));
        }

        if !order_by.is_empty() {
            self.order_rows(&mut rows, order_by, collations)?;
        }

        let aggregates: Vec<Option<AggFunc>> = items
            .iter()
            .map(|item| match item {
                SelectItem::Aggregate(func, _) => Some(*func),
                _ => None,
            })
            .collect();

        if aggregates.iter().any(Option::is_some) {
            if aggregates.iter().any(Option::is_none) {
                return Err(EngineError::Query(
                    "Cannot combine aggregate with non aggregate".to_string(),
                ));
            }
            let mut aggregated = Vec::with_capacity(columns.len());
            for (col, func) in columns.iter().zip(&aggregates) {
                let pos = self.position(col)?;
                let func = func.expect("checked above");
                let mut values = rows.iter().map(|row| &row[pos]);
                let picked = match func {
                    AggFunc::Max => values.max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)),
                    AggFunc::Min => values.min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)),
                };
                aggregated.push(picked.cloned().unwrap_or(Value::Null));
            }
            return Ok(vec![aggregated]);
        }

        let mut projected = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut record = Vec::with_capacity(columns.len());
            for col in &columns {
                let pos = self.position(col)?;
                record.push(row[pos].clone());
            }
            projected.push(record);
        }
        Ok(projected)
    }

    /// Expands `*`, `table.*` and plain columns into a flat qualified list,
    /// in projection order.
    pub(crate) fn expand_items(&self, items: &[SelectItem]) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        for item in items {
            match item {
                SelectItem::Wildcard => columns.extend(self.headers.iter().cloned()),
                SelectItem::QualifiedWildcard(table) => {
                    if table.as_str() != self.name && !self.rel_tables.contains(&table.0) {
                        return Err(EngineError::Query(
                            "Table to * is not part of outer table".to_string(),
                        ));
                    }
                    let prefix = format!("{table}.");
                    columns.extend(self.headers.iter().filter(|h| h.starts_with(&prefix)).cloned());
                }
                SelectItem::Column(col) => columns.push(self.qualify(col.as_str())),
                SelectItem::Aggregate(_, col) => columns.push(self.qualify(col.as_str())),
            }
        }
        Ok(columns)
    }

    /// Sorts `rows` by each key in `order_by`, most significant first.
    ///
    /// Rust's `sort_by` is stable, so applying it once per key from least to
    /// most significant reproduces the effect of a proper multi-key sort:
    /// each pass only breaks ties left by the previous (more significant)
    /// keys it has not yet seen, while preserving relative order among rows
    /// equal under the key just sorted.
    fn order_rows(
        &self,
        rows: &mut [Row],
        order_by: &[OrderByItem],
        collations: &HashMap<String, Collation>,
    ) -> Result<()> {
        for item in order_by.iter().rev() {
            let column = self.qualify(item.column.as_str());
            let pos = self.position(&column)?;
            let collation = match &item.collation {
                Some(name) => Some(
                    collations
                        .get(name.as_str())
                        .ok_or_else(|| EngineError::Query("Collation does not exist".to_string()))?
                        .clone(),
                ),
                None => None,
            };

            rows.sort_by(|a, b| {
                let ordering = match &collation {
                    Some(cmp) => {
                        let result = cmp(&a[pos], &b[pos]);
                        result.cmp(&0)
                    }
                    None => a[pos].partial_cmp(&b[pos]).unwrap_or(Ordering::Equal),
                };
                match item.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }
        Ok(())
    }
}

fn resolve_where(filter: &WhereClause) -> Result<(String, BinaryOperator, Value)> {
    match (&filter.left, &filter.right) {
        (Operand::Column(col), Operand::Value(value)) => Ok((col.0.clone(), filter.op, value.clone())),
        (Operand::Value(value), Operand::Column(col)) => Ok((col.0.clone(), mirror(filter.op), value.clone())),
        (Operand::Column(_), Operand::Column(_)) => Err(EngineError::Query(
            "WHERE comparisons between two columns are not supported".to_string(),
        )),
        (Operand::Value(_), Operand::Value(_)) => {
            Err(EngineError::Query("WHERE clause is missing a column".to_string()))
        }
    }
}

fn mirror(op: BinaryOperator) -> BinaryOperator {
    match op {
        BinaryOperator::Lt => BinaryOperator::Gt,
        BinaryOperator::Gt => BinaryOperator::Lt,
        other => other,
    }
}

/// Builds the ephemeral table produced by `LEFT OUTER JOIN`.
///
/// Only the first matching right-hand row is joined in for each left row
/// (non-Cartesian); a left row with no match gets an all-`NULL` right side.
/// This mirrors the behavior it was grounded on rather than full SQL JOIN
/// semantics, and is a known, documented limitation.
pub fn left_outer_join(
    left: &Table,
    right: &Table,
    join_left: &str,
    join_right: &str,
) -> Result<Table> {
    let a_on_left = left.qualify(join_left);
    let b_on_right = right.qualify(join_right);
    let a_on_right = right.qualify(join_left);
    let b_on_left = left.qualify(join_right);

    let (left_key, right_key) = if left.positions.contains_key(&a_on_left)
        && right.positions.contains_key(&b_on_right)
    {
        (a_on_left, b_on_right)
    } else if right.positions.contains_key(&a_on_right) && left.positions.contains_key(&b_on_left) {
        (b_on_left, a_on_right)
    } else {
        return Err(EngineError::Query(
            "Can't join tables based on keys provided".to_string(),
        ));
    };
    if left_key == right_key {
        return Err(EngineError::Query(
            "Joining keys can't be the same key".to_string(),
        ));
    }

    let mut headers = left.headers.clone();
    headers.extend(right.headers.iter().cloned());
    let mut types = left.types.clone();
    types.extend(right.types.iter().cloned());
    let mut defaults = left.defaults.clone();
    for (k, v) in &right.defaults {
        defaults.insert(k + left.headers.len(), v.clone());
    }

    let left_pos = left.position(&left_key)?;
    let right_pos = right.position(&right_key)?;

    let mut rows = Vec::with_capacity(left.rows.len());
    for left_row in &left.rows {
        let key = &left_row[left_pos];
        let matched = (!key.is_null())
            .then(|| right.rows.iter().find(|r| &r[right_pos] == key))
            .flatten();
        let mut row = left_row.clone();
        match matched {
            Some(right_row) => row.extend(right_row.iter().cloned()),
            None => row.extend(std::iter::repeat(Value::Null).take(right.headers.len())),
        }
        rows.push(row);
    }

    let mut table = Table::from_parts(
        format!("{}_{}_join", left.name, right.name),
        headers,
        types,
        defaults,
        vec![left.name.clone(), right.name.clone()],
    );
    table.rows = rows;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinysql_ast::Ident;

    fn students() -> Table {
        let columns = vec![
            ColumnDef {
                name: Ident::from("name"),
                data_type: tinysql_ast::DataType::Text,
                default: None,
            },
            ColumnDef {
                name: Ident::from("age"),
                data_type: tinysql_ast::DataType::Integer,
                default: Some(Value::Integer(0)),
            },
        ];
        let mut table = Table::new("students", columns).unwrap();
        table
            .insert(
                vec![
                    vec![Value::Text("Ann".to_string()), Value::Integer(20)],
                    vec![Value::Text("Bo".to_string()), Value::Integer(19)],
                    vec![Value::Text("Cy".to_string()), Value::Null],
                ],
                &[],
                false,
            )
            .unwrap();
        table
    }

    #[test]
    fn insert_applies_column_default_for_missing_value() {
        let mut table = students();
        table
            .insert(
                vec![vec![Value::Text("Dee".to_string())]],
                &["name".to_string()],
                false,
            )
            .unwrap();
        assert_eq!(table.rows.last().unwrap()[1], Value::Integer(0));
    }

    #[test]
    fn insert_rejects_wrong_type() {
        let mut table = students();
        let err = table.insert(
            vec![vec![Value::Text("Eve".to_string()), Value::Text("old".to_string())]],
            &[],
            false,
        );
        assert!(err.is_err());
    }

    #[test]
    fn where_matches_is_null_aware() {
        let table = students();
        let matches = table.where_matches("age", BinaryOperator::Gt, &Value::Integer(19)).unwrap();
        assert_eq!(matches, vec![0]);

        let nulls = table.where_matches("age", BinaryOperator::Is, &Value::Null).unwrap();
        assert_eq!(nulls, vec![2]);
    }

    #[test]
    fn select_orders_rows_ascending() {
        let table = students();
        let items = vec![SelectItem::Column(Ident::from("name"))];
        let order_by = vec![OrderByItem {
            column: Ident::from("age"),
            collation: None,
            direction: Direction::Asc,
        }];
        let rows = table
            .select(&items, false, None, &order_by, &HashMap::new())
            .unwrap();
        assert_eq!(rows[0][0], Value::Text("Bo".to_string()));
        assert_eq!(rows[1][0], Value::Text("Ann".to_string()));
        assert_eq!(rows[2][0], Value::Text("Cy".to_string()));
    }

    #[test]
    fn select_distinct_dedupes_rows() {
        let mut table = students();
        table
            .insert(
                vec![vec![Value::Text("Ann".to_string()), Value::Integer(20)]],
                &[],
                false,
            )
            .unwrap();
        let items = vec![SelectItem::Column(Ident::from("name"))];
        let rows = table.select(&items, true, None, &[], &HashMap::new()).unwrap();
        let names: Vec<&Value> = rows.iter().map(|r| &r[0]).collect();
        assert_eq!(
            names.iter().filter(|v| **v == &Value::Text("Ann".to_string())).count(),
            1
        );
    }

    #[test]
    fn left_outer_join_keeps_unmatched_rows_with_nulls() {
        let columns = vec![ColumnDef {
            name: Ident::from("name"),
            data_type: tinysql_ast::DataType::Text,
            default: None,
        }];
        let mut classes = Table::new("classes", columns).unwrap();
        classes
            .insert(vec![vec![Value::Text("Bo".to_string())]], &[], false)
            .unwrap();

        let students = students();
        let joined = left_outer_join(&students, &classes, "students.name", "classes.name").unwrap();
        assert_eq!(joined.rows.len(), 3);
        let ann_row = joined
            .rows
            .iter()
            .find(|r| r[0] == Value::Text("Ann".to_string()))
            .unwrap();
        assert_eq!(ann_row[2], Value::Null);
        let bo_row = joined
            .rows
            .iter()
            .find(|r| r[0] == Value::Text("Bo".to_string()))
            .unwrap();
        assert_eq!(bo_row[2], Value::Text("Bo".to_string()));
    }
}
