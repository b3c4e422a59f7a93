/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::consts::*;

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

pub fn load_secret(f: &str) -> String {
    let s = std::fs::read_to_string(f).unwrap_or_default();
    s.trim().replace(char::from(25), "")
}

pub fn validate_username(s: &str) -> Result<(), String> {
    if s.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if s.len() > 32 {
        return Err("Username cannot exceed 32 characters".to_string());
    }

    if s.contains(char::is_whitespace) || s.contains(char::is_control) {
        return Err("Username cannot contain whitespace".to_string());
    }

    Ok(())
}

pub fn validate_password(s: &str) -> Result<(), String> {
    if s.len() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if s.len() > 128 {
        return Err("Password cannot exceed 128 characters".to_string());
    }

    Ok(())
}
