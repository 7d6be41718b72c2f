//! LoanDesk Backend Library
//!
//! This library exports the modules of the LoanDesk loan-origination and
//! EMI-repayment server.

pub mod auth;
pub mod config;
pub mod db;
pub mod emi;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod loan;
pub mod loan_service;
pub mod middleware;
pub mod models;
pub mod payment;
pub mod payment_service;
pub mod routes;
pub mod state;
