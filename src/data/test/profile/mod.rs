use crate::{
    data::{is_unique_violation, profile::ProfileRepository, ProfileStore},
    error::AppError,
    model::profile::{CreateProfileParam, UpdateProfileParam, NO_PENDING_CODE},
};
use test_utils::{builder::TestBuilder, factory};

mod consume_code;
mod find_by_email;
mod update;
