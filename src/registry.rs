//! Table of supported panels
//!
//! The display driver builds one registry at startup, registers every panel
//! model it supports and then either probes the attached panel by ID or
//! selects a statically configured one.
use std::collections::BTreeMap;

use crate::descriptor::PanelDescriptor;
use crate::driver::Panel;
use crate::error::PanelError;
use crate::interface::Transport;

/// Display output a panel is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceSlot {
    /// Main display
    Main,
    /// Secondary display
    Sub,
}

/// Registered panel descriptors keyed by `(slot, lcd_id)`
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<(DeviceSlot, PanelDescriptor)>,
    index: BTreeMap<(DeviceSlot, u32), usize>,
}

impl PanelRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel model for `slot`.
    ///
    /// Rejects a second panel with the same ID on the same slot and panels
    /// whose scripts do not fit their payload capacity.
    pub fn register(&mut self, slot: DeviceSlot, descriptor: PanelDescriptor) -> Result<(), PanelError> {
        let key = (slot, descriptor.lcd_id);
        if self.index.contains_key(&key) {
            return Err(PanelError::DuplicatePanel {
                slot,
                id: descriptor.lcd_id,
            });
        }

        let longest = descriptor
            .ops
            .scripts()
            .iter()
            .map(|seq| seq.max_payload())
            .max()
            .unwrap_or(0);
        if longest > descriptor.config.max_payload {
            return Err(PanelError::PayloadTooLarge {
                name: descriptor.name,
                len: longest,
                capacity: descriptor.config.max_payload,
            });
        }

        log::debug!(
            "registered {} (0x{:06X}) for {:?}",
            descriptor.name,
            descriptor.lcd_id,
            slot
        );
        self.index.insert(key, self.panels.len());
        self.panels.push((slot, descriptor));
        Ok(())
    }

    /// Descriptor registered for `slot` under `id`
    pub fn get(&self, slot: DeviceSlot, id: u32) -> Option<&PanelDescriptor> {
        self.index
            .get(&(slot, id))
            .and_then(|i| self.panels.get(*i))
            .map(|(_, desc)| desc)
    }

    /// Panels of `slot` in registration order
    pub fn panels(&self, slot: DeviceSlot) -> impl Iterator<Item = &PanelDescriptor> {
        self.panels
            .iter()
            .filter(move |(s, _)| *s == slot)
            .map(|(_, desc)| desc)
    }

    /// Number of registered panels
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Find the attached panel by asking every candidate on the transport's
    /// bus for its ID; the first whose probe returns its own `lcd_id` gets
    /// the transport.
    pub fn probe(&self, slot: DeviceSlot, mut transport: Transport) -> Result<Panel<'_>, PanelError> {
        let bus = transport.kind();
        for desc in self.panels(slot).filter(|d| d.bus.kind() == bus) {
            let id = desc.ops.read_id(desc, &mut transport);
            if id == desc.lcd_id {
                log::info!("{:?}: detected {} (0x{:06X})", slot, desc.name, id);
                return Panel::new(desc, transport);
            }
            log::debug!(
                "{:?}: {} does not match (read 0x{:06X})",
                slot,
                desc.name,
                id
            );
        }
        log::error!("{:?}: no panel detected on {:?} bus", slot, bus);
        Err(PanelError::NotDetected(slot))
    }

    /// Bind `transport` to the statically configured panel `id`
    pub fn select(&self, slot: DeviceSlot, id: u32, transport: Transport) -> Result<Panel<'_>, PanelError> {
        let desc = self
            .get(slot, id)
            .ok_or(PanelError::UnknownPanel { slot, id })?;
        log::info!("{:?}: using {} (0x{:06X})", slot, desc.name, id);
        Panel::new(desc, transport)
    }
}
