// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod flags;
mod logging;
mod mongo;
mod principals;

pub use flags::FlagsConfigLayer;
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use mongo::{MongoConfig, MongoConfigLayer, DEFAULT_APP_NAME, DEFAULT_MONGO_URI};
pub use principals::PrincipalsConfigLayer;
