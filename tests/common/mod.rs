// SPDX-FileCopyrightText: 2026 Tempora contributors
//
// SPDX-License-Identifier: Apache-2.0

pub mod fixtures;
