use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

pub const ORDER_SERVERS: u32 = 1;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StationKind {
    Order,
    Pay,
    Pickup,
}

impl StationKind {
    pub const ALL: [StationKind; 3] = [StationKind::Order, StationKind::Pay, StationKind::Pickup];

    pub fn index(self) -> usize {
        match self {
            StationKind::Order => 0,
            StationKind::Pay => 1,
            StationKind::Pickup => 2,
        }
    }

    pub fn next(self) -> Option<StationKind> {
        match self {
            StationKind::Order => Some(StationKind::Pay),
            StationKind::Pay => Some(StationKind::Pickup),
            StationKind::Pickup => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StationKind::Order => "Order",
            StationKind::Pay => "Pay",
            StationKind::Pickup => "Pickup",
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct ServiceTimes {
    #[serde(default = "default_order_service")]
    pub order: f64,
    #[serde(default = "default_pay_service")]
    pub pay: f64,
    #[serde(default = "default_pickup_service")]
    pub pickup: f64,
}

impl ServiceTimes {
    pub fn mean_for(&self, station: StationKind) -> f64 {
        match station {
            StationKind::Order => self.order,
            StationKind::Pay => self.pay,
            StationKind::Pickup => self.pickup,
        }
    }
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            order: default_order_service(),
            pay: default_pay_service(),
            pickup: default_pickup_service(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    #[serde(default = "default_arrival_interval")]
    pub arrival_interval: f64,
    #[serde(default = "default_duration")]
    pub duration_minutes: u64,
    #[serde(default = "default_server_count")]
    pub pay_servers: u32,
    #[serde(default = "default_server_count")]
    pub pickup_servers: u32,
    #[serde(default)]
    pub service_times: ServiceTimes,
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arrival_interval: default_arrival_interval(),
            duration_minutes: default_duration(),
            pay_servers: default_server_count(),
            pickup_servers: default_server_count(),
            service_times: ServiceTimes::default(),
            seed: default_seed(),
        }
    }
}

impl SimConfig {
    pub fn new(
        arrival_interval: f64,
        duration_minutes: u64,
        pay_servers: u32,
        pickup_servers: u32,
    ) -> Result<Self> {
        let config = Self {
            arrival_interval,
            duration_minutes,
            pay_servers,
            pickup_servers,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_service_times(mut self, service_times: ServiceTimes) -> Result<Self> {
        self.service_times = service_times;
        self.validate()?;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn servers_for(&self, station: StationKind) -> u32 {
        match station {
            StationKind::Order => ORDER_SERVERS,
            StationKind::Pay => self.pay_servers,
            StationKind::Pickup => self.pickup_servers,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration_minutes as f64
    }

    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.arrival_interval) {
            return Err(Error::InvalidArrivalInterval(self.arrival_interval));
        }
        if self.duration_minutes == 0 {
            return Err(Error::InvalidDuration);
        }
        for station in [StationKind::Pay, StationKind::Pickup] {
            let count = self.servers_for(station);
            if count == 0 {
                return Err(Error::InvalidServerCount {
                    station: station.to_string(),
                    count,
                });
            }
        }
        for station in StationKind::ALL {
            let value = self.service_times.mean_for(station);
            if !is_positive(value) {
                return Err(Error::InvalidServiceTime {
                    station: station.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn default_arrival_interval() -> f64 {
    2.0
}

fn default_duration() -> u64 {
    240
}

fn default_server_count() -> u32 {
    1
}

fn default_order_service() -> f64 {
    1.5
}

fn default_pay_service() -> f64 {
    1.0
}

fn default_pickup_service() -> f64 {
    2.0
}

fn default_seed() -> Option<u64> {
    Some(42)
}
