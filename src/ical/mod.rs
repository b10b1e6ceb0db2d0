//! This module exports events as iCal files, so that they can be imported into other calendar applications

mod builder;
pub use builder::build_from;

use crate::config::{read_setting, ORG_NAME, PRODUCT_NAME};

pub fn default_prod_id() -> String {
    format!("-//{}//{}//EN", read_setting(&ORG_NAME), read_setting(&PRODUCT_NAME))
}
