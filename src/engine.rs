use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::arrivals::{sample_exponential, ArrivalGenerator};
use crate::error::Result;
use crate::events::{CarId, Event, EventScheduler};
use crate::journey::CarJourney;
use crate::metrics::{compute_kpis, compute_utilization, station_stats, wait_percentiles};
use crate::models::{SimConfig, StationKind};
use crate::monitor::QueueMonitor;
use crate::station::{Admission, Station};
use crate::state::{CarRecord, SimulationResult};

pub struct SimulationEngine {
    config: SimConfig,
    scheduler: EventScheduler,
    stations: [Station; 3],
    arrivals: ArrivalGenerator,
    monitor: QueueMonitor,
    journeys: Vec<CarJourney>,
    completed: Vec<CarRecord>,
    rng: StdRng,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stations = StationKind::ALL.map(|kind| Station::new(kind, config.servers_for(kind)));
        let arrivals = ArrivalGenerator::new(config.arrival_interval);

        Ok(Self {
            config,
            scheduler: EventScheduler::new(),
            stations,
            arrivals,
            monitor: QueueMonitor::default(),
            journeys: Vec::new(),
            completed: Vec::new(),
            rng,
        })
    }

    pub fn run(mut self) -> SimulationResult {
        let horizon = self.config.duration();
        info!(
            arrival_interval = self.config.arrival_interval,
            duration = self.config.duration_minutes,
            pay_servers = self.config.pay_servers,
            pickup_servers = self.config.pickup_servers,
            seed = ?self.config.seed,
            "starting drive-thru simulation"
        );

        let first_arrival = self.arrivals.next_delay(&mut self.rng);
        self.scheduler.schedule_in(first_arrival, Event::Arrival);
        self.scheduler.schedule_in(0.0, Event::QueueSample);

        while let Some(event) = self.scheduler.next_before(horizon) {
            match event {
                Event::Arrival => self.on_arrival(),
                Event::ServiceComplete { car_id, station } => {
                    self.on_service_complete(car_id, station)
                }
                Event::QueueSample => self.on_queue_sample(),
            }
        }

        self.finish()
    }

    fn on_arrival(&mut self) {
        let now = self.scheduler.now();
        let id = self.arrivals.next_id();
        let service_times = self.config.service_times;
        let demand = StationKind::ALL
            .map(|station| sample_exponential(&mut self.rng, service_times.mean_for(station)));
        trace!(car = id, time = now, "car arrived");
        self.journeys.push(CarJourney::new(id, now, demand));
        self.enter_station(id, StationKind::Order);

        let delay = self.arrivals.next_delay(&mut self.rng);
        self.scheduler.schedule_in(delay, Event::Arrival);
    }

    fn on_service_complete(&mut self, car_id: CarId, station: StationKind) {
        let now = self.scheduler.now();
        let served = self.journey_mut(car_id).finish_service(station, now);
        if let Some(next) = self.stations[station.index()].release(served) {
            self.start_service(next, station);
        }

        match station.next() {
            Some(next_station) => self.enter_station(car_id, next_station),
            None => {
                let record = self.journey_mut(car_id).to_record();
                debug!(
                    car = car_id,
                    time = now,
                    total_wait = record.total_wait,
                    "car left the drive-thru"
                );
                self.completed.push(record);
            }
        }
    }

    fn on_queue_sample(&mut self) {
        let now = self.scheduler.now();
        self.monitor.sample(now, &self.stations);
        let period = self.monitor.period();
        self.scheduler.schedule_in(period, Event::QueueSample);
    }

    fn enter_station(&mut self, car_id: CarId, station: StationKind) {
        let now = self.scheduler.now();
        self.journey_mut(car_id).enter_queue(station, now);
        match self.stations[station.index()].request(car_id) {
            Admission::Granted => self.start_service(car_id, station),
            Admission::Queued => trace!(
                car = car_id,
                %station,
                queue_len = self.stations[station.index()].queue_len(),
                "car queued"
            ),
        }
    }

    fn start_service(&mut self, car_id: CarId, station: StationKind) {
        let now = self.scheduler.now();
        let duration = self.journey_mut(car_id).start_service(station, now);
        self.scheduler.schedule_in(duration, Event::ServiceComplete { car_id, station });
    }

    // Ids are issued sequentially from 1 and journeys are never removed.
    fn journey_mut(&mut self, car_id: CarId) -> &mut CarJourney {
        &mut self.journeys[car_id - 1]
    }

    fn finish(self) -> SimulationResult {
        let SimulationEngine {
            config,
            stations,
            arrivals,
            monitor,
            completed,
            scheduler,
            ..
        } = self;

        let busy_times = stations.each_ref().map(Station::busy_time);
        let utilization = compute_utilization(&config, completed.len(), busy_times);
        let kpis = compute_kpis(&completed, config.duration_minutes);
        let wait_percentiles = wait_percentiles(&completed);
        let queue_samples = monitor.into_samples();
        let station_stats = station_stats(&config, &completed, &queue_samples);
        let in_flight = arrivals.issued() - completed.len();

        info!(
            served = kpis.count,
            in_flight,
            dropped_events = scheduler.pending(),
            mean_wait = kpis.mean_wait,
            "simulation finished"
        );

        SimulationResult {
            config,
            cars: completed,
            queue_samples,
            utilization,
            kpis,
            wait_percentiles,
            station_stats,
            in_flight,
        }
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationResult> {
    let engine = SimulationEngine::new(config.clone())?;
    Ok(engine.run())
}
