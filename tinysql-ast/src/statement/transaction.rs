use std::fmt;

/// The locking mode requested by a `BEGIN` statement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransactionMode {
    /// `DEFERRED` (the default) — acquires no lock until the first write.
    Deferred,
    /// `IMMEDIATE` — acquires a reserved lock immediately.
    Immediate,
    /// `EXCLUSIVE` — acquires an exclusive lock immediately.
    Exclusive,
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionMode::Deferred => "DEFERRED",
            TransactionMode::Immediate => "IMMEDIATE",
            TransactionMode::Exclusive => "EXCLUSIVE",
        })
    }
}

/// `BEGIN [DEFERRED|IMMEDIATE|EXCLUSIVE] TRANSACTION`
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BeginStmt {
    /// The requested locking mode.
    pub mode: TransactionMode,
}

impl fmt::Display for BeginStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BEGIN {} TRANSACTION", self.mode)
    }
}
