// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod lookup;
pub mod settings;
pub mod sprite;
