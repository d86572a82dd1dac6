use chrono::{DateTime, Duration, Utc};

/// Lifetime of a login session
pub const SESSION_TTL_HOURS: i64 = 8;

/// Expiry instant for a session started at `login_time`
pub fn session_expiry(login_time: DateTime<Utc>) -> DateTime<Utc> {
    login_time + Duration::hours(SESSION_TTL_HOURS)
}

/// Format an integer with `.` thousands separators (es-CO style)
///
/// Used to render salaries: `2500000` → `2.500.000`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Up to two upper-cased initials of a display name
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
