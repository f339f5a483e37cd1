use axum::http::Method;

use wirecast_core::{Endpoint, Registry, RegistryError};

pub mod data;
pub mod system;

/// Registration table for every endpoint the API serves.
///
/// Built once at startup; the resulting [`Registry`] is immutable.
pub fn registry() -> Result<Registry, RegistryError> {
    Registry::builder()
        .endpoint(Endpoint::get("/", system::welcome))
        .endpoint(Endpoint::get("/intdata", data::intdata))
        .endpoint(Endpoint::get("/floatdata", data::floatdata))
        .endpoint(Endpoint::get("/stringdata", data::stringdata))
        .endpoint(Endpoint::get("/booldata", data::booldata))
        .endpoint(Endpoint::get("/listdata", data::listdata))
        .endpoint(Endpoint::get("/tupledata", data::tupledata))
        .endpoint(Endpoint::get("/setdata", data::setdata))
        .endpoint(Endpoint::get("/dictdata", data::dictdata))
        .endpoint(Endpoint::get("/nonedata", data::nonedata))
        .endpoint(Endpoint::get("/returnnothing", data::returnnothing))
        .endpoint(Endpoint::get_with("/modeldata", data::modeldata))
        .endpoint(Endpoint::get("/datetimedata", data::datetimedata))
        .endpoint(Endpoint::get("/datedata", data::datedata))
        .endpoint(Endpoint::get("/timedata", data::timedata))
        .endpoint(Endpoint::get("/decimaldata", data::decimaldata))
        .endpoint(Endpoint::get("/uuiddata", data::uuiddata))
        .endpoint(Endpoint::raw("/error/{status}", Method::GET, system::error_display))
        .build()
}
