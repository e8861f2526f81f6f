//! Bus transports a panel can be bound to
//!
//! The framebuffer controller driver supplies the primitives of exactly one
//! bus: MIPI DSI, SPI or the MCU parallel bus. [`Transport`] owns that
//! binding together with the delay provider and is what the sequence
//! interpreter and the ID/ESD protocols talk to.
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// MIPI DSI primitives supplied by the display controller driver
pub trait MipiOps {
    /// Switch the link to command mode
    fn set_cmd_mode(&mut self) -> Result<(), DisplayError>;
    /// Switch the link to video mode
    fn set_video_mode(&mut self) -> Result<(), DisplayError>;
    /// Low-power signaling
    fn set_lp_mode(&mut self) -> Result<(), DisplayError>;
    /// High-speed signaling
    fn set_hs_mode(&mut self) -> Result<(), DisplayError>;
    /// Generic write packet
    fn gen_write(&mut self, buf: &[u8]) -> Result<(), DisplayError>;
    /// DCS write packet
    fn dcs_write(&mut self, buf: &[u8]) -> Result<(), DisplayError>;
    /// Write with an explicit DSI data type
    fn force_write(&mut self, data_type: u8, buf: &[u8]) -> Result<(), DisplayError>;
    /// Read `out.len()` bytes from `reg`, returns the number of bytes received
    fn force_read(&mut self, reg: u8, out: &mut [u8]) -> Result<usize, DisplayError>;
    /// Enable/disable end-of-transmission packets on receive and transmit
    fn eotp_set(&mut self, rx_enable: bool, tx_enable: bool) -> Result<(), DisplayError>;
}

/// SPI panel primitives
pub trait SpiOps {
    /// Send a command word
    fn send_cmd(&mut self, cmd: u32) -> Result<(), DisplayError>;
    /// Send a data word
    fn send_data(&mut self, data: u32) -> Result<(), DisplayError>;
    /// Read one word
    fn read(&mut self, out: &mut u32) -> Result<(), DisplayError>;
}

/// MCU (8080/6800 parallel) bus primitives
pub trait McuOps {
    /// Send a command word
    fn send_cmd(&mut self, cmd: u32) -> Result<(), DisplayError>;
    /// Send a data word
    fn send_data(&mut self, data: u32) -> Result<(), DisplayError>;
    /// Send a command word followed by one data word
    fn send_cmd_data(&mut self, cmd: u32, data: u32) -> Result<(), DisplayError>;
    /// Read one data word
    fn read_data(&mut self) -> Result<u32, DisplayError>;
}

/// Which of the three buses a binding or descriptor uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusKind {
    /// MIPI DSI
    Mipi,
    /// SPI
    Spi,
    /// MCU parallel bus
    Mcu,
}

/// MIPI packet used for untyped `SEND` steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MipiWriteMode {
    /// Generic write
    #[default]
    Generic,
    /// DCS write
    Dcs,
}

/// The one bus a panel is bound to for its lifetime
pub enum BusBinding {
    /// MIPI DSI
    Mipi(Box<dyn MipiOps>),
    /// SPI
    Spi(Box<dyn SpiOps>),
    /// MCU parallel bus
    Mcu(Box<dyn McuOps>),
}

impl BusBinding {
    /// Kind of the bound bus
    pub fn kind(&self) -> BusKind {
        match self {
            BusBinding::Mipi(_) => BusKind::Mipi,
            BusBinding::Spi(_) => BusKind::Spi,
            BusBinding::Mcu(_) => BusKind::Mcu,
        }
    }
}

/// A bus binding plus the delay provider used for sequence sleeps
pub struct Transport {
    bus: BusBinding,
    delay: Box<dyn DelayNs>,
}

impl Transport {
    /// Bind a bus and a delay provider
    pub fn new(bus: BusBinding, delay: impl DelayNs + 'static) -> Self {
        Transport {
            bus,
            delay: Box::new(delay),
        }
    }

    /// Transport over MIPI DSI primitives
    pub fn mipi(ops: impl MipiOps + 'static, delay: impl DelayNs + 'static) -> Self {
        Self::new(BusBinding::Mipi(Box::new(ops)), delay)
    }

    /// Transport over SPI primitives
    pub fn spi(ops: impl SpiOps + 'static, delay: impl DelayNs + 'static) -> Self {
        Self::new(BusBinding::Spi(Box::new(ops)), delay)
    }

    /// Transport over MCU bus primitives
    pub fn mcu(ops: impl McuOps + 'static, delay: impl DelayNs + 'static) -> Self {
        Self::new(BusBinding::Mcu(Box::new(ops)), delay)
    }

    /// Kind of the bound bus
    pub fn kind(&self) -> BusKind {
        self.bus.kind()
    }

    /// The MIPI primitives, if this is a MIPI binding
    pub fn mipi_ops(&mut self) -> Option<&mut (dyn MipiOps + 'static)> {
        match &mut self.bus {
            BusBinding::Mipi(ops) => Some(ops.as_mut()),
            _ => None,
        }
    }

    /// The MCU primitives, if this is an MCU binding
    pub fn mcu_ops(&mut self) -> Option<&mut (dyn McuOps + 'static)> {
        match &mut self.bus {
            BusBinding::Mcu(ops) => Some(ops.as_mut()),
            _ => None,
        }
    }

    /// Write one `SEND` payload.
    ///
    /// On MIPI an explicit data type forces the packet type, otherwise `mode`
    /// picks generic or DCS. SPI and MCU send the first byte as a command and
    /// every following byte as a data word; a command with exactly one data
    /// byte goes out as a single MCU command/data cycle.
    pub fn write(
        &mut self,
        data_type: Option<u8>,
        payload: &[u8],
        mode: MipiWriteMode,
    ) -> Result<(), DisplayError> {
        match &mut self.bus {
            BusBinding::Mipi(ops) => match (data_type, mode) {
                (Some(dt), _) => ops.force_write(dt, payload),
                (None, MipiWriteMode::Generic) => ops.gen_write(payload),
                (None, MipiWriteMode::Dcs) => ops.dcs_write(payload),
            },
            BusBinding::Spi(ops) => write_words(ops.as_mut(), payload),
            BusBinding::Mcu(ops) => match payload {
                [cmd, data] => ops.send_cmd_data(u32::from(*cmd), u32::from(*data)),
                _ => write_words(ops.as_mut(), payload),
            },
        }
    }

    /// Read `buf.len()` bytes from register `reg`, returns how many arrived
    pub fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<usize, DisplayError> {
        match &mut self.bus {
            BusBinding::Mipi(ops) => ops.force_read(reg, buf),
            BusBinding::Spi(ops) => {
                ops.send_cmd(u32::from(reg))?;
                for byte in buf.iter_mut() {
                    let mut word = 0;
                    ops.read(&mut word)?;
                    *byte = word as u8;
                }
                Ok(buf.len())
            }
            BusBinding::Mcu(ops) => {
                ops.send_cmd(u32::from(reg))?;
                for byte in buf.iter_mut() {
                    *byte = ops.read_data()? as u8;
                }
                Ok(buf.len())
            }
        }
    }

    /// Command mode on MIPI, no-op on other buses
    pub fn set_cmd_mode(&mut self) -> Result<(), DisplayError> {
        self.mipi_ops().map_or(Ok(()), |ops| ops.set_cmd_mode())
    }

    /// Video mode on MIPI, no-op on other buses
    pub fn set_video_mode(&mut self) -> Result<(), DisplayError> {
        self.mipi_ops().map_or(Ok(()), |ops| ops.set_video_mode())
    }

    /// Low-power mode on MIPI, no-op on other buses
    pub fn set_lp_mode(&mut self) -> Result<(), DisplayError> {
        self.mipi_ops().map_or(Ok(()), |ops| ops.set_lp_mode())
    }

    /// High-speed mode on MIPI, no-op on other buses
    pub fn set_hs_mode(&mut self) -> Result<(), DisplayError> {
        self.mipi_ops().map_or(Ok(()), |ops| ops.set_hs_mode())
    }

    /// EOTP framing on MIPI, no-op on other buses
    pub fn eotp_set(&mut self, rx_enable: bool, tx_enable: bool) -> Result<(), DisplayError> {
        self.mipi_ops()
            .map_or(Ok(()), |ops| ops.eotp_set(rx_enable, tx_enable))
    }

    /// Block for `ms` milliseconds
    pub fn sleep_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Block for `us` microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

/// Command/data word stream shared by the SPI and MCU buses
trait WordBus {
    fn command(&mut self, word: u32) -> Result<(), DisplayError>;
    fn data(&mut self, word: u32) -> Result<(), DisplayError>;
}

impl WordBus for dyn SpiOps {
    fn command(&mut self, word: u32) -> Result<(), DisplayError> {
        self.send_cmd(word)
    }

    fn data(&mut self, word: u32) -> Result<(), DisplayError> {
        self.send_data(word)
    }
}

impl WordBus for dyn McuOps {
    fn command(&mut self, word: u32) -> Result<(), DisplayError> {
        self.send_cmd(word)
    }

    fn data(&mut self, word: u32) -> Result<(), DisplayError> {
        self.send_data(word)
    }
}

/// First byte as a command word, the rest as data words; empty payloads send nothing
fn write_words<B: WordBus + ?Sized>(bus: &mut B, payload: &[u8]) -> Result<(), DisplayError> {
    let Some((cmd, data)) = payload.split_first() else {
        return Ok(());
    };
    bus.command(u32::from(*cmd))?;
    data.iter().try_for_each(|b| bus.data(u32::from(*b)))
}

/// 4-wire SPI panel connection: an SPI device plus the data/command pin
pub struct SpiInterface<SPI, DC> {
    /// SPI device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC> {
    /// Wrap an SPI device and its D/C pin
    pub fn new(spi: SPI, dc: DC) -> Self {
        SpiInterface { spi, dc }
    }

    /// Give the SPI device and pin back
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> SpiOps for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn send_cmd(&mut self, cmd: u32) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[cmd as u8]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", cmd, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    fn send_data(&mut self, data: u32) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(&[data as u8])
            .map_err(|_| DisplayError::BusWriteError)
    }

    fn read(&mut self, out: &mut u32) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let mut buffer = [0u8; 1];
        self.spi
            .read(&mut buffer)
            .map_err(|_| DisplayError::BusWriteError)?;

        *out = u32::from(buffer[0]);
        Ok(())
    }
}
