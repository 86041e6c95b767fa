use actix_web::web;

use crate::{
    database::{assert, get_uid_from_token},
    models::usuarios::ROL_PROGRAMADOR,
    DbPool,
};

pub async fn get_programador_from_token(
    token: String,
    pool: &web::Data<DbPool>,
) -> anyhow::Result<String> {
    let uid = get_uid_from_token(token, pool).await?;
    assert::assert_cuenta_activa(pool, uid.clone(), ROL_PROGRAMADOR).await?;
    Ok(uid)
}
