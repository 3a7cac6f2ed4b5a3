//! SQLite-backed repositories. Identifiers and timestamps are stored as
//! TEXT and only scalar columns cross this boundary; the embedded account
//! and pix key references are re-resolved from their ids on `find`.

pub mod error;
pub mod interface;
pub mod memory;

use {
    crate::{
        models::{
            Account, Bank, Base, KeyStatus, PixKey, PixKeyKind, Transaction, TransactionStatus,
        },
        persistence::{
            error::RepositoryError,
            interface::{PixKeyRepositoryInterface, TransactionRepositoryInterface},
        },
    },
    chrono::{DateTime, Utc},
    rusqlite::{Connection, OptionalExtension, params},
    std::sync::{Mutex, MutexGuard},
    uuid::Uuid,
};

type AccountRow = (String, String, String, String, String, String);
type PixKeyRow = (String, String, String, String, String, String, String);

pub struct Persistence {
    conn: Mutex<Connection>,
}

impl Persistence {
    pub fn new(db_path: &str) -> Result<Self, RepositoryError> {
        Self::with_connection(Connection::open(db_path)?)
    }

    /// Private throwaway database; used by tests.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, RepositoryError> {
        let persistence = Persistence {
            conn: Mutex::new(conn),
        };
        persistence.init_db()?;
        Ok(persistence)
    }

    fn init_db(&self) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS banks (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                code TEXT NOT NULL,
                name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                bank_id TEXT NOT NULL,
                number TEXT NOT NULL,
                owner_name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS pix_keys (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                kind TEXT NOT NULL,
                account_id TEXT NOT NULL,
                key TEXT NOT NULL,
                status TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                account_from_id TEXT NOT NULL,
                amount REAL NOT NULL,
                pix_key_id_to TEXT NOT NULL,
                status TEXT NOT NULL,
                description TEXT,
                cancel_description TEXT
            );",
        )?;
        Ok(())
    }

    fn acquire_connection(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Storage("connection lock poisoned".to_string()))
    }

    fn id_exists(conn: &Connection, table: &str, id: Uuid) -> Result<bool, RepositoryError> {
        let query = format!("SELECT 1 FROM {table} WHERE id = ?1");
        let found: Option<i64> = conn
            .query_row(&query, params![id.to_string()], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn find_key(&self, id: Uuid) -> Result<PixKey, RepositoryError> {
        let row = {
            let conn = self.acquire_connection()?;
            conn.query_row(
                "SELECT id, created_at, updated_at, kind, account_id, key, status
                 FROM pix_keys WHERE id = ?1",
                params![id.to_string()],
                pix_key_row,
            )
            .optional()?
        };
        pix_key_from_row(row.ok_or(RepositoryError::PixKeyNotFound)?)
    }
}

impl TransactionRepositoryInterface for Persistence {
    fn register(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        if Self::id_exists(&conn, "transactions", transaction.base.id)? {
            return Err(RepositoryError::AlreadyRegistered);
        }
        conn.execute(
            "INSERT INTO transactions
                (id, created_at, updated_at, account_from_id, amount,
                 pix_key_id_to, status, description, cancel_description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                transaction.base.id.to_string(),
                transaction.base.created_at.to_rfc3339(),
                transaction.base.updated_at.to_rfc3339(),
                transaction.account_from_id.to_string(),
                transaction.amount,
                transaction.pix_key_id_to.to_string(),
                transaction.status.to_string(),
                transaction.description,
                transaction.cancel_description,
            ],
        )?;
        Ok(())
    }

    fn save(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        let updated = conn.execute(
            "UPDATE transactions
             SET updated_at = ?2, amount = ?3, status = ?4,
                 description = ?5, cancel_description = ?6
             WHERE id = ?1",
            params![
                transaction.base.id.to_string(),
                transaction.base.updated_at.to_rfc3339(),
                transaction.amount,
                transaction.status.to_string(),
                transaction.description,
                transaction.cancel_description,
            ],
        )?;
        if updated == 0 {
            return Err(RepositoryError::TransactionNotFound);
        }
        Ok(())
    }

    fn find(&self, id: Uuid) -> Result<Transaction, RepositoryError> {
        let row = {
            let conn = self.acquire_connection()?;
            conn.query_row(
                "SELECT id, created_at, updated_at, account_from_id, amount,
                        pix_key_id_to, status, description, cancel_description
                 FROM transactions WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, f64>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, Option<String>>(7)?,
                        row.get::<_, Option<String>>(8)?,
                    ))
                },
            )
            .optional()?
        };
        let (
            id,
            created_at,
            updated_at,
            account_from_id,
            amount,
            pix_key_id_to,
            status,
            description,
            cancel_description,
        ) = row.ok_or(RepositoryError::TransactionNotFound)?;

        let account_from_id = parse_id(&account_from_id)?;
        let pix_key_id_to = parse_id(&pix_key_id_to)?;
        // Resolve the durable links back into owning references so the
        // caller gets a fully validated aggregate.
        let account_from = self.find_account(account_from_id)?;
        let pix_key_to = self.find_key(pix_key_id_to)?;

        Ok(Transaction {
            base: parse_base(&id, &created_at, &updated_at)?,
            account_from,
            account_from_id,
            amount,
            pix_key_to,
            pix_key_id_to,
            status: status
                .parse::<TransactionStatus>()
                .map_err(|e| RepositoryError::Storage(e.to_string()))?,
            description,
            cancel_description,
        })
    }
}

impl PixKeyRepositoryInterface for Persistence {
    fn add_bank(&self, bank: &Bank) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        if Self::id_exists(&conn, "banks", bank.base.id)? {
            return Err(RepositoryError::AlreadyRegistered);
        }
        conn.execute(
            "INSERT INTO banks (id, created_at, updated_at, code, name)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                bank.base.id.to_string(),
                bank.base.created_at.to_rfc3339(),
                bank.base.updated_at.to_rfc3339(),
                bank.code,
                bank.name,
            ],
        )?;
        Ok(())
    }

    fn add_account(&self, account: &Account) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        if Self::id_exists(&conn, "accounts", account.base.id)? {
            return Err(RepositoryError::AlreadyRegistered);
        }
        conn.execute(
            "INSERT INTO accounts (id, created_at, updated_at, bank_id, number, owner_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account.base.id.to_string(),
                account.base.created_at.to_rfc3339(),
                account.base.updated_at.to_rfc3339(),
                account.bank_id.to_string(),
                account.number,
                account.owner_name,
            ],
        )?;
        Ok(())
    }

    fn find_account(&self, id: Uuid) -> Result<Account, RepositoryError> {
        let row = {
            let conn = self.acquire_connection()?;
            conn.query_row(
                "SELECT id, created_at, updated_at, bank_id, number, owner_name
                 FROM accounts WHERE id = ?1",
                params![id.to_string()],
                account_row,
            )
            .optional()?
        };
        account_from_row(row.ok_or(RepositoryError::AccountNotFound)?)
    }

    fn register_key(&self, pix_key: &PixKey) -> Result<(), RepositoryError> {
        let conn = self.acquire_connection()?;
        if Self::id_exists(&conn, "pix_keys", pix_key.base.id)? {
            return Err(RepositoryError::AlreadyRegistered);
        }
        conn.execute(
            "INSERT INTO pix_keys (id, created_at, updated_at, kind, account_id, key, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                pix_key.base.id.to_string(),
                pix_key.base.created_at.to_rfc3339(),
                pix_key.base.updated_at.to_rfc3339(),
                pix_key.kind.to_string(),
                pix_key.account_id.to_string(),
                pix_key.key,
                pix_key.status.to_string(),
            ],
        )?;
        Ok(())
    }

    fn find_key_by_kind(&self, key: &str, kind: PixKeyKind) -> Result<PixKey, RepositoryError> {
        let row = {
            let conn = self.acquire_connection()?;
            conn.query_row(
                "SELECT id, created_at, updated_at, kind, account_id, key, status
                 FROM pix_keys WHERE key = ?1 AND kind = ?2",
                params![key, kind.to_string()],
                pix_key_row,
            )
            .optional()?
        };
        pix_key_from_row(row.ok_or(RepositoryError::PixKeyNotFound)?)
    }
}

fn account_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn pix_key_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PixKeyRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn account_from_row(row: AccountRow) -> Result<Account, RepositoryError> {
    let (id, created_at, updated_at, bank_id, number, owner_name) = row;
    Ok(Account {
        base: parse_base(&id, &created_at, &updated_at)?,
        bank_id: parse_id(&bank_id)?,
        number,
        owner_name,
    })
}

fn pix_key_from_row(row: PixKeyRow) -> Result<PixKey, RepositoryError> {
    let (id, created_at, updated_at, kind, account_id, key, status) = row;
    Ok(PixKey {
        base: parse_base(&id, &created_at, &updated_at)?,
        kind: kind
            .parse::<PixKeyKind>()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        account_id: parse_id(&account_id)?,
        key,
        status: status
            .parse::<KeyStatus>()
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
    })
}

fn parse_base(id: &str, created_at: &str, updated_at: &str) -> Result<Base, RepositoryError> {
    Ok(Base {
        id: parse_id(id)?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    })
}

fn parse_id(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::Storage(format!("malformed id: {e}")))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Storage(format!("malformed timestamp: {e}")))
}
