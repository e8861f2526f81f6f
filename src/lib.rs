//! sprdfb panel layer
//!
//! Panel-side half of a framebuffer display driver: per-model command
//! scripts, an interpreter that plays them over whichever bus the panel is
//! wired to, and the ID and ESD read-back protocols.
//!
//! ### Usage
//! 1. wrap the controller's bus primitives in a [`Transport`]
//! ([`MipiOps`], [`SpiOps`] or [`McuOps`] plus an `embedded_hal` delay)
//! 1. register the supported models with [`panels::register_all`]
//! 1. find the attached panel with [`PanelRegistry::probe`], or pick one by
//! ID with [`PanelRegistry::select`]
//! 1. drive it through the returned [`Panel`]: `init`, `enter_sleep`,
//! `check_and_recover`, ...
//!
//! Scripts are built with [`Sequence`]; legacy tagged tables are decoded
//! with [`Sequence::from_tagged`].
#![warn(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod config;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod esd;
pub mod flag;
pub mod identify;
pub mod interface;
pub mod panels;
pub mod registry;
pub mod sequence;
pub mod tag;

pub use crate::cmd::{Cmd, DataType};
pub use crate::config::{EsdPolicy, PanelConfig};
pub use crate::descriptor::{Direction, PanelDescriptor, PanelOperations, ScriptedPanel, Window};
pub use crate::driver::{EsdStatus, Panel};
pub use crate::error::PanelError;
pub use crate::flag::Flag;
pub use crate::identify::{IdCheck, IdProbe, Signature, UNIDENTIFIED};
pub use crate::interface::{
    BusBinding, BusKind, McuOps, MipiOps, MipiWriteMode, SpiInterface, SpiOps, Transport,
};
pub use crate::registry::{DeviceSlot, PanelRegistry};
pub use crate::sequence::{Instruction, Sequence};
