//! Process-wide engine state
//!
//! Containers and staging sessions are boxed and registered here. The opaque
//! pointer handed to callers is the box address, and every call looks it up
//! again, so unknown or already freed pointers are rejected instead of
//! dereferenced.

use crate::error::{NativeError, Result};
use crate::file::BMFile;
use crate::mesh_trans::MeshTransition;
use bmap_ffi::{BMFilePtr, MeshTransPtr};
use parking_lot::{const_mutex, Mutex};
use std::collections::BTreeMap;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

static ENGINE: Mutex<Engine> = const_mutex(Engine::new());

/// Registry of live containers and sessions
pub struct Engine {
    /// Number of BMInit calls not yet matched by BMDispose
    init_count: u32,
    files: BTreeMap<usize, Box<BMFile>>,
    sessions: BTreeMap<usize, Box<MeshTransition>>,
}

impl Engine {
    const fn new() -> Self {
        Self {
            init_count: 0,
            files: BTreeMap::new(),
            sessions: BTreeMap::new(),
        }
    }

    pub fn init(&mut self) {
        self.init_count += 1;
        if self.init_count == 1 {
            log::info!("BMap engine started");
        }
    }

    /// Drop one init reference, the last one frees everything still open
    pub fn dispose(&mut self) -> Result<()> {
        self.require_init()?;
        self.init_count -= 1;

        if self.init_count == 0 {
            if !self.files.is_empty() || !self.sessions.is_empty() {
                log::warn!(
                    "Disposing engine with {} open containers and {} staging sessions",
                    self.files.len(),
                    self.sessions.len()
                );
            }
            self.files.clear();
            self.sessions.clear();
            log::info!("BMap engine shut down");
        }
        Ok(())
    }

    pub fn require_init(&self) -> Result<()> {
        if self.init_count == 0 {
            Err(NativeError::NotInitialized)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // Containers
    // ========================================================================

    pub fn insert_file(&mut self, file: BMFile) -> BMFilePtr {
        let file = Box::new(file);
        let ptr = &*file as *const BMFile as *mut c_void;
        self.files.insert(ptr as usize, file);
        ptr
    }

    pub fn remove_file(&mut self, ptr: BMFilePtr) -> Result<Box<BMFile>> {
        self.files
            .remove(&(ptr as usize))
            .ok_or(NativeError::UnknownFile(ptr as usize))
    }

    pub fn file_mut(&mut self, ptr: BMFilePtr) -> Result<&mut BMFile> {
        self.files
            .get_mut(&(ptr as usize))
            .map(|file| &mut **file)
            .ok_or(NativeError::UnknownFile(ptr as usize))
    }

    // ========================================================================
    // Staging sessions
    // ========================================================================

    pub fn insert_session(&mut self, session: MeshTransition) -> MeshTransPtr {
        let session = Box::new(session);
        let ptr = &*session as *const MeshTransition as *mut c_void;
        self.sessions.insert(ptr as usize, session);
        ptr
    }

    pub fn remove_session(&mut self, ptr: MeshTransPtr) -> Result<Box<MeshTransition>> {
        self.sessions
            .remove(&(ptr as usize))
            .ok_or(NativeError::UnknownSession(ptr as usize))
    }

    pub fn session_mut(&mut self, ptr: MeshTransPtr) -> Result<&mut MeshTransition> {
        self.sessions
            .get_mut(&(ptr as usize))
            .map(|session| &mut **session)
            .ok_or(NativeError::UnknownSession(ptr as usize))
    }

    /// Borrow a session and a container at the same time
    pub fn session_and_file(
        &mut self,
        session: MeshTransPtr,
        file: BMFilePtr,
    ) -> Result<(&mut MeshTransition, &mut BMFile)> {
        let session = self
            .sessions
            .get_mut(&(session as usize))
            .ok_or(NativeError::UnknownSession(session as usize))?;
        let file = self
            .files
            .get_mut(&(file as usize))
            .ok_or(NativeError::UnknownFile(file as usize))?;
        Ok((&mut **session, &mut **file))
    }
}

/// Run an entry point body, turning errors and panics into `false`
pub fn guarded<F>(entry: &'static str, body: F) -> bool
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            log::debug!("{} failed: {}", entry, e);
            false
        }
        Err(_) => {
            log::error!("{} panicked", entry);
            false
        }
    }
}

/// Run an entry point body against the initialized engine
///
/// The engine lock is held for the whole call, so `body` must not call back
/// into the caller.
pub fn with_engine<F>(entry: &'static str, body: F) -> bool
where
    F: FnOnce(&mut Engine) -> Result<()>,
{
    guarded(entry, || {
        let mut engine = ENGINE.lock();
        engine.require_init()?;
        body(&mut engine)
    })
}

/// Run a body against the engine even when it is not initialized
pub fn with_engine_raw<F>(entry: &'static str, body: F) -> bool
where
    F: FnOnce(&mut Engine) -> Result<()>,
{
    guarded(entry, || body(&mut ENGINE.lock()))
}
