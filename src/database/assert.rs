use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, models::usuarios::ROL_PROGRAMADOR, DbPool};

pub async fn assert_usuario(pool: &web::Data<DbPool>, uid: String) -> anyhow::Result<()> {
    use crate::schema::usuarios;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        usuarios::table
            .filter(usuarios::uid.eq(uid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    if res == 0 {
        bail!("El usuario no existe");
    }

    Ok(())
}

/// La cuenta existe, tiene el rol del panel y no está bloqueada.
pub async fn assert_cuenta_activa(
    pool: &web::Data<DbPool>,
    uid: String,
    rol: &'static str,
) -> anyhow::Result<()> {
    use crate::schema::usuarios;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        usuarios::table
            .filter(usuarios::uid.eq(uid))
            .filter(usuarios::rol.eq(rol))
            .filter(usuarios::bloqueado.eq(false))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    if res == 0 {
        bail!("La cuenta no existe, está bloqueada o no tiene rol de {}", rol);
    }

    Ok(())
}

pub async fn assert_programador(pool: &web::Data<DbPool>, uid: String) -> anyhow::Result<()> {
    use crate::schema::usuarios;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        usuarios::table
            .filter(usuarios::uid.eq(uid))
            .filter(usuarios::rol.eq(ROL_PROGRAMADOR))
            .filter(usuarios::bloqueado.eq(false))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    if res == 0 {
        bail!("El programador no existe");
    }

    Ok(())
}

pub async fn assert_asesoria(pool: &web::Data<DbPool>, id: String) -> anyhow::Result<()> {
    use crate::schema::asesorias;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        asesorias::table
            .filter(asesorias::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    if res == 0 {
        bail!("La asesoría no existe");
    }

    Ok(())
}

pub async fn assert_proyecto(pool: &web::Data<DbPool>, id: String) -> anyhow::Result<()> {
    use crate::schema::proyectos;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        proyectos::table
            .filter(proyectos::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    if res == 0 {
        bail!("El proyecto no existe");
    }

    Ok(())
}
