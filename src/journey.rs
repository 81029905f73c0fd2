use crate::events::CarId;
use crate::models::StationKind;
use crate::state::{CarRecord, StageTimes};

// Service demands are drawn on arrival so they do not depend on staffing.
#[derive(Clone, Debug)]
pub struct CarJourney {
    pub id: CarId,
    pub arrival_time: f64,
    service_demand: [f64; 3],
    stages: [StageTimes; 3],
}

impl CarJourney {
    pub fn new(id: CarId, arrival_time: f64, service_demand: [f64; 3]) -> Self {
        Self {
            id,
            arrival_time,
            service_demand,
            stages: [StageTimes::default(); 3],
        }
    }

    pub fn service_demand(&self, station: StationKind) -> f64 {
        self.service_demand[station.index()]
    }

    pub fn enter_queue(&mut self, station: StationKind, now: f64) {
        self.stages[station.index()].queue_entry = now;
    }

    pub fn start_service(&mut self, station: StationKind, now: f64) -> f64 {
        self.stages[station.index()].service_start = now;
        self.service_demand(station)
    }

    pub fn finish_service(&mut self, station: StationKind, now: f64) -> f64 {
        let stage = &mut self.stages[station.index()];
        stage.service_end = now;
        stage.service()
    }

    pub fn to_record(&self) -> CarRecord {
        let [order, pay, pickup] = self.stages;
        let completion_time = pickup.service_end;
        let total_system_time = completion_time - self.arrival_time;
        let total_wait = order.wait() + pay.wait() + pickup.wait();

        CarRecord {
            id: self.id,
            arrival_time: self.arrival_time,
            completion_time,
            wait_order: order.wait(),
            wait_pay: pay.wait(),
            wait_pickup: pickup.wait(),
            total_wait,
            total_service: total_system_time - total_wait,
            total_system_time,
            stages: self.stages,
        }
    }
}
