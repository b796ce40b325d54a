use std::sync::Arc;

use crate::{
    config::Config,
    db::connection::DbPool,
    services::{
        balance::BalanceService, holiday::HolidayService, leave_workflow::LeaveService,
        lifecycle::LifecycleService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub leave: LeaveService,
    pub balances: BalanceService,
    pub lifecycle: LifecycleService,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        let holidays = Arc::new(HolidayService::new(pool.clone()));
        Self {
            leave: LeaveService::new(pool.clone(), holidays),
            balances: BalanceService::new(pool.clone()),
            lifecycle: LifecycleService::new(pool.clone()),
            pool,
            config,
        }
    }
}
