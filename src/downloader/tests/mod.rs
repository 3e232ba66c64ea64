use super::test_helpers::*;
use super::*;
use crate::error::{Error, Stage};
use crate::types::FetchRequest;
use std::time::Duration;
