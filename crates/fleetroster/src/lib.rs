//! `fleetroster` - A local fleet roster manager
//!
//! This library keeps a list of vehicle records in local storage and provides
//! the admin page logic for adding, editing, filtering and deleting them,
//! behind a simple login session flag.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod logging;
pub mod render;
pub mod repository;
pub mod session;
pub mod storage;
pub mod vehicle;

pub use config::Config;
pub use controller::{AdminController, Outcome, PageLoad, Skip, VehicleForm};
pub use error::{Error, Result};
pub use filter::Filters;
pub use interaction::{Interaction, ScriptedInteraction, TerminalInteraction};
pub use logging::init_logging;
pub use repository::FleetRepository;
pub use session::{AccessGuard, Navigation, Page, Session};
pub use storage::{ItemStore, MemoryStore, Storage};
pub use vehicle::{Category, VehicleRecord};
