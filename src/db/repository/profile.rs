use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Gender, UserProfile};

/// Insert or replace the profile row. Intake resubmission updates the
/// same profile in place.
pub fn upsert_profile(conn: &Connection, profile: &UserProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO profiles (id, name, age, gender) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET name = ?2, age = ?3, gender = ?4",
        params![
            profile.id.to_string(),
            profile.name,
            profile.age,
            profile.gender.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_profile(conn: &Connection, id: Uuid) -> Result<Option<UserProfile>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, age, gender FROM profiles WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((id, name, age, gender)) = row else {
        return Ok(None);
    };

    Ok(Some(UserProfile {
        id: Uuid::parse_str(&id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name,
        age,
        gender: Gender::parse(&gender).ok_or_else(|| DatabaseError::InvalidEnum {
            field: "gender".to_string(),
            value: gender,
        })?,
    }))
}
