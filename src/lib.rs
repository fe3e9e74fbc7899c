pub(crate) mod data {
    pub mod datasources {
        pub mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod request_model;
        }
        pub(crate) mod wire_format;
    }
    pub(crate) mod repositories {
        pub mod receipt_validator_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod call_context;
        pub mod environment;
        pub mod purchase_ordering;
        pub mod purchase_record;
        pub mod receipt_status;
        pub mod timestamp;
        pub mod validation_response;
    }
    pub mod repositories {
        pub mod receipt_validator;
    }
}

pub mod config;
mod constants;
pub mod errors;
pub mod util;

pub use data::datasources::verify_receipt_datasource::{
    ReceiptRequester, ReqwestReceiptRequester,
};
