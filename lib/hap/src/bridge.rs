use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Accessory, Result};

/// Stable identifier for an accessory derived from its configured name.
pub fn generate_uuid(name: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// What the bridge remembers about an accessory between restarts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedAccessory {
    #[serde(rename = "UUID")]
    pub uuid: Uuid,
    pub display_name: String,
    #[serde(default)]
    pub context: serde_json::Value,
}

/// A plugin that owns a set of accessories on the bridge.
pub trait Platform {
    /// Called once per accessory restored from the cache, before launch.
    fn configure_accessory(&mut self, accessory: &Accessory);

    /// Called once the cache is restored; the platform creates, registers and
    /// wires its accessories here.
    fn did_finish_launching(&mut self, bridge: &mut Bridge);
}

pub struct Bridge {
    accessories: Vec<Accessory>,
    cache_path: Option<PathBuf>,
}

impl Bridge {
    pub fn new() -> Bridge {
        Bridge {
            accessories: vec![],
            cache_path: None,
        }
    }

    /// Creates a bridge with the accessories stored at `cache_path`. A missing
    /// file means an empty cache.
    pub fn restore(cache_path: impl AsRef<Path>) -> Result<Bridge> {
        let cache_path = cache_path.as_ref().to_path_buf();

        let cached: Vec<CachedAccessory> = if cache_path.exists() {
            let data = std::fs::read(&cache_path)?;
            serde_json::from_slice(&data)?
        } else {
            debug!("no accessory cache at {}", cache_path.display());
            vec![]
        };

        let accessories = cached
            .into_iter()
            .map(|cached| {
                let mut accessory = Accessory::new(cached.display_name, cached.uuid);
                accessory.context = cached.context;
                accessory
            })
            .collect();

        Ok(Bridge {
            accessories,
            cache_path: Some(cache_path),
        })
    }

    /// Hands restored accessories to the platform, lets it finish its setup
    /// and persists the resulting accessory list.
    pub fn launch(&mut self, platform: &mut impl Platform) -> Result<()> {
        for accessory in self.accessories.iter() {
            info!("Loading accessory from cache: {}", accessory.display_name());
            platform.configure_accessory(accessory);
        }

        platform.did_finish_launching(self);

        self.save_cache()
    }

    pub fn register_platform_accessories(&mut self, accessories: Vec<Accessory>) {
        for accessory in accessories {
            debug!(
                "registered accessory {} {}",
                accessory.display_name(),
                accessory.uuid()
            );
            self.accessories.push(accessory);
        }
    }

    pub fn accessories(&self) -> &[Accessory] {
        &self.accessories
    }

    pub fn accessory_mut(&mut self, uuid: Uuid) -> Option<&mut Accessory> {
        self.accessories.iter_mut().find(|a| a.uuid() == uuid)
    }

    /// Accessory ids start at 1 in registration order.
    pub fn accessory_by_aid_mut(&mut self, aid: u64) -> Option<&mut Accessory> {
        let index = usize::try_from(aid.checked_sub(1)?).ok()?;
        self.accessories.get_mut(index)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let accessories: Vec<_> = self
            .accessories
            .iter()
            .enumerate()
            .map(|(index, accessory)| accessory.to_json(index as u64 + 1))
            .collect();

        serde_json::json!({ "accessories": accessories })
    }

    pub fn save_cache(&self) -> Result<()> {
        let cache_path = match &self.cache_path {
            Some(cache_path) => cache_path,
            None => return Ok(()),
        };

        let cached: Vec<_> = self
            .accessories
            .iter()
            .map(|accessory| CachedAccessory {
                uuid: accessory.uuid(),
                display_name: accessory.display_name().to_string(),
                context: accessory.context.clone(),
            })
            .collect();

        std::fs::write(cache_path, serde_json::to_vec_pretty(&cached)?)?;
        debug!("saved {} accessories to {}", cached.len(), cache_path.display());

        Ok(())
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}
