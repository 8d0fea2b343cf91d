//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use gridstore::testing::MemoryRegion;
use gridstore::{EntityInformation, RegionTemplate, SimpleRegionRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: u64,
    pub name: String,
    pub legs: u64,
}

pub fn animal(id: u64, name: &str) -> Animal {
    Animal {
        id,
        name: name.to_string(),
        legs: 4,
    }
}

pub fn animal_with_legs(id: u64, name: &str, legs: u64) -> Animal {
    Animal {
        id,
        name: name.to_string(),
        legs,
    }
}

/// Identity accessor treating id 0 as "no identity assigned"
pub struct AnimalInfo;

impl EntityInformation<Animal> for AnimalInfo {
    type Id = u64;

    fn id_of(&self, entity: &Animal) -> Option<u64> {
        (entity.id != 0).then_some(entity.id)
    }

    fn entity_name(&self) -> &str {
        "Animal"
    }
}

/// Identity accessor that allocates sequential ids for unassigned
/// entities, the way a host-side id generator would
pub struct SequencedAnimalInfo {
    sequence: AtomicU64,
}

impl SequencedAnimalInfo {
    pub fn new() -> Self {
        SequencedAnimalInfo {
            sequence: AtomicU64::new(0),
        }
    }
}

impl EntityInformation<Animal> for SequencedAnimalInfo {
    type Id = u64;

    fn id_of(&self, entity: &Animal) -> Option<u64> {
        if entity.id != 0 {
            Some(entity.id)
        } else {
            Some(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn entity_name(&self) -> &str {
        "Animal"
    }
}

pub type AnimalRegion = MemoryRegion<u64, Animal>;

pub fn repository(
    region: Arc<AnimalRegion>,
) -> SimpleRegionRepository<AnimalRegion, AnimalInfo> {
    SimpleRegionRepository::new(RegionTemplate::new(region), AnimalInfo)
}
