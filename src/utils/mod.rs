/*
 * Utilities
 *
 * Logging infrastructure shared by the library and the command-line tool.
 */

pub mod log_buffer;
pub mod logger;
