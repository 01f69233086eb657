// src/bus/mod.rs

mod io_helpers;
mod transaction;

#[cfg(feature = "impl-native")]
pub mod native;

use crate::common::{
    config::{BusConfig, MAX_BUSES},
    error::{BusError, ConfigError},
    hal_traits::{BusController, BusTimer},
};
use core::sync::atomic::{AtomicU8, Ordering};
use log::{debug, info, warn};

/// Tracks which bus controllers are installed.
///
/// Each bus id can be installed once; a second `initialize` for the same id
/// fails until the first handle is released. Usually lives in a `static`;
/// it must not move while any of its handles are outstanding.
#[derive(Debug)]
pub struct BusRegistry {
    installed: AtomicU8,
}

impl BusRegistry {
    pub const fn new() -> Self {
        BusRegistry {
            installed: AtomicU8::new(0),
        }
    }

    /// Validates `config`, claims its bus id and configures the controller.
    ///
    /// The id is released again if the controller rejects the configuration.
    pub fn initialize<IF, T>(
        &self,
        config: BusConfig,
        mut controller: IF,
        timer: T,
    ) -> Result<BusHandle<IF, T>, BusError<IF::Error>>
    where
        IF: BusController,
        T: BusTimer,
    {
        config.validate()?;

        let mask = Self::mask(config.bus_id);
        if self.installed.fetch_or(mask, Ordering::AcqRel) & mask != 0 {
            return Err(ConfigError::AlreadyInstalled(config.bus_id).into());
        }

        if let Err(e) = controller.configure(&config) {
            debug!("bus {} controller rejected configuration: {:?}", config.bus_id, e);
            self.installed.fetch_and(!mask, Ordering::AcqRel);
            return Err(ConfigError::Rejected(config.bus_id).into());
        }

        info!(
            "bus {} installed: SDA={} SCL={} {} Hz",
            config.bus_id, config.sda_pin, config.scl_pin, config.clock_hz
        );

        Ok(BusHandle {
            config,
            controller,
            timer,
            issuer: self.id(),
        })
    }

    /// Uninstalls the bus and hands back its controller and timer.
    ///
    /// A handle issued by another registry is taken apart without touching
    /// this registry's installed set.
    pub fn release<IF, T>(&self, handle: BusHandle<IF, T>) -> (IF, T)
    where
        IF: BusController,
        T: BusTimer,
    {
        if handle.issuer == self.id() {
            self.installed
                .fetch_and(!Self::mask(handle.config.bus_id), Ordering::AcqRel);
            debug!("bus {} released", handle.config.bus_id);
        } else {
            warn!(
                "bus {} handle released into a registry that did not issue it",
                handle.config.bus_id
            );
        }
        (handle.controller, handle.timer)
    }

    pub fn is_installed(&self, bus_id: u8) -> bool {
        bus_id < MAX_BUSES && self.installed.load(Ordering::Acquire) & Self::mask(bus_id) != 0
    }

    #[inline]
    const fn mask(bus_id: u8) -> u8 {
        1 << bus_id
    }

    /// Identity of this registry, recorded in every handle it issues.
    #[inline]
    fn id(&self) -> usize {
        self as *const Self as usize
    }
}

impl Default for BusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One installed bus controller.
///
/// All transactions take `&mut self`, so two transactions can never overlap
/// on the same handle. Share it between tasks behind a mutex.
#[derive(Debug)]
pub struct BusHandle<IF, T>
where
    IF: BusController,
    T: BusTimer,
{
    config: BusConfig,
    controller: IF,
    timer: T,
    issuer: usize,
}

impl<IF, T> BusHandle<IF, T>
where
    IF: BusController,
    T: BusTimer,
{
    pub fn bus_id(&self) -> u8 {
        self.config.bus_id
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mock::{MockController, MockTimer};

    #[test]
    fn test_initialize_configures_controller() {
        let registry = BusRegistry::new();
        let config = BusConfig::default();
        let handle = registry
            .initialize(config, MockController::with_device(0x38), MockTimer::new())
            .unwrap();

        assert_eq!(handle.bus_id(), 0);
        assert_eq!(handle.controller.configured, Some(config));
        assert!(registry.is_installed(0));
        assert!(!registry.is_installed(1));
    }

    #[test]
    fn test_double_install_rejected() {
        let registry = BusRegistry::new();
        let _first = registry
            .initialize(BusConfig::default(), MockController::default(), MockTimer::new())
            .unwrap();

        let second =
            registry.initialize(BusConfig::default(), MockController::default(), MockTimer::new());
        assert!(matches!(
            second,
            Err(BusError::Config(ConfigError::AlreadyInstalled(0)))
        ));

        // A different bus id is independent.
        let other = registry.initialize(
            BusConfig::default().with_bus_id(1),
            MockController::default(),
            MockTimer::new(),
        );
        assert!(other.is_ok());
    }

    #[test]
    fn test_release_allows_reinstall() {
        let registry = BusRegistry::new();
        let handle = registry
            .initialize(BusConfig::default(), MockController::default(), MockTimer::new())
            .unwrap();

        let (controller, timer) = registry.release(handle);
        assert!(!registry.is_installed(0));

        assert!(registry.initialize(BusConfig::default(), controller, timer).is_ok());
    }

    #[test]
    fn test_release_into_other_registry_keeps_both_claims() {
        let first = BusRegistry::new();
        let second = BusRegistry::new();
        let handle = first
            .initialize(BusConfig::default(), MockController::default(), MockTimer::new())
            .unwrap();
        let _held = second
            .initialize(BusConfig::default(), MockController::default(), MockTimer::new())
            .unwrap();

        let (controller, timer) = second.release(handle);

        // Neither registry lets bus 0 be installed a second time.
        assert!(first.is_installed(0));
        assert!(second.is_installed(0));
        assert!(matches!(
            second.initialize(BusConfig::default(), controller, timer),
            Err(BusError::Config(ConfigError::AlreadyInstalled(0)))
        ));
    }

    #[test]
    fn test_invalid_config_does_not_claim_bus() {
        let registry = BusRegistry::new();
        let result = registry.initialize(
            BusConfig::default().with_pins(4, 4),
            MockController::default(),
            MockTimer::new(),
        );
        assert!(matches!(
            result,
            Err(BusError::Config(ConfigError::PinConflict(4)))
        ));
        assert!(!registry.is_installed(0));
    }

    #[test]
    fn test_rejected_config_releases_bus() {
        let registry = BusRegistry::new();
        let controller = MockController {
            reject_config: true,
            ..Default::default()
        };
        let result = registry.initialize(BusConfig::default(), controller, MockTimer::new());
        assert!(matches!(
            result,
            Err(BusError::Config(ConfigError::Rejected(0)))
        ));
        assert!(!registry.is_installed(0));
    }
}
