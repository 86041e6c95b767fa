pub mod assert;

use crate::{models::sesiones::SesionData, DbPool};
use actix_web::web;
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

pub fn get_db_conn(
    pool: &web::Data<DbPool>,
) -> anyhow::Result<PooledConnection<ConnectionManager<MysqlConnection>>> {
    pool.get().context("Error de conexión a la base de datos")
}

/// Resuelve un token de sesión al uid que lo emitió. Los tokens caducan
/// a la hora; el rol se verifica aparte, en el módulo de cada panel.
pub async fn get_uid_from_token(token: String, pool: &web::Data<DbPool>) -> anyhow::Result<String> {
    use crate::schema::sesiones;
    const MAX_LOGIN_TIME_SECS: i64 = 3600;

    let conn = get_db_conn(pool)?;
    let data = web::block(move || {
        sesiones::table
            .filter(sesiones::token.eq(token))
            .order(sesiones::login_time.desc())
            .limit(1)
            .get_result::<SesionData>(&conn)
            .optional()
    })
    .await
    .context("Error de base de datos")?;

    if let Some(data) = data {
        let time_diff = Utc::now()
            .naive_utc()
            .signed_duration_since(data.login_time);
        if time_diff.num_seconds() <= MAX_LOGIN_TIME_SECS {
            Ok(data.uid)
        } else {
            bail!("La sesión ha expirado");
        }
    } else {
        bail!("No has iniciado sesión");
    }
}
