//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing every remote report to the
//! logger (UART / USB-CDC in production). The cloud glue substitutes its
//! own implementation of the same trait; this one also serves host tests
//! and boards provisioned without connectivity.

use log::info;

use crate::app::params::{Param, ParamValue};
use crate::app::ports::ReportSink;

/// Adapter that logs every report instead of transmitting it.
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for LogReportSink {
    fn report(&mut self, param: Param, value: ParamValue) {
        info!("REPORT | {param} = {value}");
    }
}
