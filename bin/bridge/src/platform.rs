use std::sync::Arc;

use hap::{generate_uuid, Accessory, Bridge, Platform, Uuid};
use hyunho::Transport;
use log::{debug, error, info};

use crate::adapter::{self, Adapter, Profile};
use crate::{AccessoryConfig, Config, DeviceType, Result};

/// Turns the configured accessory list into bridge accessories, reusing the
/// ones restored from the cache.
pub struct HyunhoPlatform {
    config: Config,
    transport: Arc<dyn Transport>,
    restored: Vec<Uuid>,
}

impl HyunhoPlatform {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> HyunhoPlatform {
        HyunhoPlatform {
            config,
            transport,
            restored: vec![],
        }
    }

    fn discover_device(&self, bridge: &mut Bridge, config: &AccessoryConfig) {
        let uuid = generate_uuid(&config.name);

        if bridge.accessory_mut(uuid).is_none() {
            info!("Adding new accessory: {}", config.name);
            bridge.register_platform_accessories(vec![Accessory::new(config.name.as_str(), uuid)]);
        } else if self.restored.contains(&uuid) {
            info!("Restoring existing accessory from cache: {}", config.name);
        }

        let Some(accessory) = bridge.accessory_mut(uuid) else {
            return;
        };

        if accessory.has_handler() {
            error!("[ERROR] {}: accessory name is used twice", config.name);
            return;
        }

        match serde_json::to_value(config) {
            Ok(context) => accessory.context = context,
            Err(err) => error!("[ERROR] {}: {}", config.name, err),
        }

        // unknown types keep a bare accessory without handlers
        let profile = match profile(config) {
            Ok(profile) => profile,
            Err(err) => {
                error!("[ERROR] {}: {}", config.name, err);
                return;
            }
        };

        let adapter = Adapter::new(config.name.as_str(), self.transport.clone(), profile);
        adapter::install(accessory, adapter);
    }
}

impl Platform for HyunhoPlatform {
    fn configure_accessory(&mut self, accessory: &Accessory) {
        debug!("configure accessory {}", accessory.display_name());
        self.restored.push(accessory.uuid());
    }

    fn did_finish_launching(&mut self, bridge: &mut Bridge) {
        debug!("Executed didFinishLaunching callback");

        for config in self.config.accessories.iter() {
            self.discover_device(bridge, config);
        }
    }
}

/// Service layout and bindings for a configured accessory.
pub fn profile(config: &AccessoryConfig) -> Result<Profile> {
    let name = config.name.as_str();

    let profile = match config.device_type()? {
        DeviceType::AirConditioner => {
            adapter::conditioner::profile(name, config.room()?, config.horizontal_swing)
        }
        DeviceType::HeaterCooler => adapter::heater_cooler::profile(name, config.room()?),
        DeviceType::Heater => adapter::heater::profile(name, config.room()?),
        DeviceType::Fan => adapter::fan::profile(name),
        DeviceType::Light => adapter::light::profile(name, config.room()?),
        DeviceType::LightAll => adapter::light_group::profile(name),
        DeviceType::Cook => adapter::cooker::profile(name),
        DeviceType::Elevator => adapter::elevator::profile(name),
        DeviceType::InfraRed => adapter::infrared::profile(name),
    };

    Ok(profile)
}
