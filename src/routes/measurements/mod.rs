mod handlers;
mod types;

pub use handlers::{insert_measurement, insert_measurements, list_measurements};
pub use types::{
    BatchInsertResponse, MeasurementRequest, MeasurementResponse, MeasurementWindow,
    MeasurementsQuery,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_insert_measurement, __path_insert_measurements, __path_list_measurements};
