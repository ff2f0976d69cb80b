mod config;
mod sim_time;
mod topology;
mod viz_report;
