//! Числа, которые приходят из HTML-форм и старых файлов данных строками
//! (`"10"`, `"2.5"`). Принимаются и JSON-числа, и такие строки.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_f64(&value).map_err(D::Error::custom)
}

pub fn deserialize_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    to_u32(&value).map_err(D::Error::custom)
}

/// Для необязательных полей: отсутствие и `null` дают `None`
pub fn deserialize_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => to_f64(&value).map(Some).map_err(D::Error::custom),
    }
}

pub fn deserialize_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => to_u32(&value).map(Some).map_err(D::Error::custom),
    }
}

/// Целое со знаком: диапазон проверяет вызывающий код
pub fn deserialize_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) if n.is_i64() => Ok(n.as_i64()),
        value => {
            let number = to_f64(&value).map_err(D::Error::custom)?;
            if number.fract() != 0.0 || number < i64::MIN as f64 || number >= i64::MAX as f64 {
                return Err(D::Error::custom(format!("expected an integer, got {}", value)));
            }
            Ok(Some(number as i64))
        }
    }
}

fn to_f64(value: &Value) -> Result<f64, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(format!("expected a number, got {}", value)),
    }
}

fn to_u32(value: &Value) -> Result<u32, String> {
    if let Value::Number(n) = value {
        if let Some(whole) = n.as_u64() {
            return u32::try_from(whole).map_err(|_| format!("number out of range: {}", whole));
        }
    }
    let number = to_f64(value)?;
    if number.fract() != 0.0 || number < 0.0 || number > f64::from(u32::MAX) {
        return Err(format!("expected a non-negative integer, got {}", value));
    }
    Ok(number as u32)
}
