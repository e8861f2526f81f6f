//! Placeholder panel for boards running without a display
//!
//! Reports a fixed ID without touching the bus, so probing the main slot on
//! an MCU bus always ends here when no real panel answered first.
use crate::config::{BusInfo, LcdMode, McuBusMode, McuInfo, McuTiming, PanelConfig, ResetTiming};
use crate::descriptor::{PanelDescriptor, ScriptedPanel};
use crate::identify::IdCheck;
use crate::sequence::Sequence;

/// Logical ID
pub const LCD_ID: u32 = 0xFFFF;

/// Panel descriptor
pub fn descriptor() -> PanelDescriptor {
    PanelDescriptor {
        name: "dummy",
        lcd_id: LCD_ID,
        width: 320,
        height: 480,
        mode: LcdMode::Mcu,
        bus: BusInfo::Mcu(McuInfo {
            bus_mode: McuBusMode::I8080,
            bus_width: 16,
            bpp: 16,
            timing: McuTiming {
                rcss: 25,
                rlpw: 45,
                rhpw: 90,
                wcss: 30,
                wlpw: 30,
                whpw: 30,
            },
        }),
        reset: ResetTiming {
            high_ms: 0,
            low_ms: 0,
            settle_ms: 0,
        },
        config: PanelConfig::new(),
        ops: Box::new(ScriptedPanel::new(Sequence::new(), IdCheck::Fixed(LCD_ID))),
    }
}
