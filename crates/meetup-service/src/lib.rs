//! # meetup-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    EventService, MeetupService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SessionService, VenueService,
};
