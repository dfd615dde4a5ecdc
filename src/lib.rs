//! Backend de administración de la flota de transporte universitario
//!
//! CRUD de universidades, conductores, autobuses, distritos,
//! representantes y rutas; seguimiento de viajes diarios sobre dos
//! tablas paralelas unificadas en lectura; estadísticas agregadas; e
//! importación masiva desde Excel/CSV.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
