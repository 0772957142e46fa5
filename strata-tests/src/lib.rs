mod batches;
mod guards;
mod merges;
mod mock;
mod paging;
mod quoting;

pub use mock::*;

use crate::{
    batches::batches, guards::guards, merges::merges, paging::paging, quoting::quoting,
};
use log::LevelFilter;
use std::env;
use strata_core::StatementBuilder;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Properties every dialect must honor, whatever its syntax.
pub fn execute_tests(builder: &dyn StatementBuilder) {
    quoting(builder);
    guards(builder);
    paging(builder);
    batches(builder);
    merges(builder);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
