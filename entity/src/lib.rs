/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod comment;
pub mod improvement;
pub mod project;
pub mod user;
