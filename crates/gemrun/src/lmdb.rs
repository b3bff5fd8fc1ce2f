//! Scoped access to the LMDB register database.

use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;
use std::rc::Weak;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use heed::types::Bytes;
use heed::types::Str;
use heed::Database;
use heed::Env;
use heed::EnvFlags;
use heed::EnvOpenOptions;
use heed::RoTxn;

/// Environment variable naming the directory that holds the database.
const PATH_VAR: &str = "GEM_PATH";

/// Database file name inside `$GEM_PATH`.
const DB_NAME: &str = "address_table.mdb";

/// Maximum size of the LMDB map, currently 50 MiB.
const MAP_SIZE: usize = 50 * 1024 * 1024;

/// Shared data owned by the guards. The read transaction drops before the
/// environment it reads from.
struct Shared {
    rtxn: RoTxn<'static>,
    env: Env,
    db: Database<Str, Bytes>,
}

impl Shared {
    fn open() -> Result<Self> {
        let path = env::var(PATH_VAR)
            .with_context(|| format!("environment variable {} is not defined", PATH_VAR))?;
        let full_path = PathBuf::from(path).join(DB_NAME);

        let mut options = EnvOpenOptions::new();
        options.map_size(MAP_SIZE);
        // The address table is a plain file, not an LMDB directory.
        unsafe { options.flags(EnvFlags::NO_SUB_DIR) };
        let env = unsafe { options.open(&full_path) }
            .with_context(|| format!("opening register database {}", full_path.display()))?;

        let rtxn = env.clone().static_read_txn()?;
        let db = env
            .open_database(&rtxn, None)?
            .context("register database has no default table")?;

        Ok(Self { rtxn, env, db })
    }
}

thread_local! {
    static SHARED: RefCell<Weak<Shared>> = RefCell::new(Weak::new());
}

/// Scoped, reference-counted access to the read-only register database.
///
/// The first live guard opens the environment at
/// `$GEM_PATH/address_table.mdb`, begins a read-only transaction and opens
/// the default table; further guards share those objects, and the last
/// guard to drop releases them. Handlers acquire a guard at function
/// entry, so release is guaranteed on every control path.
///
/// Not thread-safe: the shared state lives in a thread-local.
pub struct LmdbGuard {
    shared: Rc<Shared>,
}

impl LmdbGuard {
    /// Acquires a guard, opening the shared state when this is the first
    /// live guard. Fails when `GEM_PATH` is unset, the database cannot be
    /// opened, or the guard count is saturated.
    pub fn new() -> Result<Self> {
        SHARED.with(|cell| {
            let mut weak = cell.borrow_mut();
            if let Some(shared) = weak.upgrade() {
                if Rc::strong_count(&shared) == usize::MAX {
                    bail!("out of register database guard handles");
                }
                Ok(Self { shared })
            } else {
                let shared = Rc::new(Shared::open()?);
                *weak = Rc::downgrade(&shared);
                Ok(Self { shared })
            }
        })
    }

    /// The LMDB environment.
    pub fn env(&self) -> &Env {
        &self.shared.env
    }

    /// The long-lived read-only transaction.
    pub fn rtxn(&self) -> &RoTxn<'static> {
        &self.shared.rtxn
    }

    /// The default table handle.
    pub fn db(&self) -> Database<Str, Bytes> {
        self.shared.db
    }

    /// Looks up one raw record in the address table.
    pub fn get(&self, key: &str) -> Result<Option<&[u8]>> {
        Ok(self.shared.db.get(&self.shared.rtxn, key)?)
    }
}

impl Clone for LmdbGuard {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}
