mod alerts;
mod common;
mod service;
