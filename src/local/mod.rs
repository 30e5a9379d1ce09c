// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Filesystem operations on the local (master) node.
//!
//! Every operation returns the message printed on success, or an
//! [`Error`](crate::error::Error) describing why it failed.

mod create;
mod list;
mod permissions;
mod transfer;

pub use create::create_file;
pub use list::{filtered_subdirectories, list_files, list_files_filter, DirectoryDetails};
pub use permissions::{parse_mode, set_permissions};
pub use transfer::{copy_file_or_directory, move_file_or_directory};
