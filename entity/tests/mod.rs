/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Test modules for entity package
