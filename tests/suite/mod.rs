mod boundary_flow;
mod config;
