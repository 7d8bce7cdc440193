//! # Reporting Module / 报告模块
//!
//! This module renders execution reports and play results, either as
//! colorful localized console output or as JSON records.
//!
//! 此模块以彩色本地化控制台输出或 JSON 记录的形式呈现执行报告和流程结果。

pub mod console;
pub mod json;

pub use console::{print_exec_report, print_failure_details, print_summary};
pub use json::print_json;
