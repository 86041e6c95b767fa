mod requests;
mod responses;
mod utils;

use crate::{
    agenda::{Dia, HorarioSemanal},
    database::{assert, get_db_conn},
    models::{
        asesorias::AsesoriaData,
        horarios::HorarioData,
        sesiones::SesionData,
        usuarios::{
            UpdateUsuario, UsuarioData, ROL_ADMINISTRADOR, ROL_PROGRAMADOR, ROL_USUARIO,
        },
    },
    protocol::{AsesoriaItem, PerfilItem, SimpleResponse},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::get_admin_from_token};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(buscar_usuarios)
        .service(ver_usuario)
        .service(modificar_usuario)
        .service(modificar_horarios)
        .service(bloquear_usuario)
        .service(eliminar_usuario)
        .service(buscar_asesorias)
        .service(eliminar_asesoria);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, SimpleResponse),
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (buscar_usuarios, "/buscar_usuarios", BuscarUsuariosRequest, BuscarUsuariosResponse),
    (ver_usuario, "/ver_usuario", VerUsuarioRequest, VerUsuarioResponse),
    (modificar_usuario, "/modificar_usuario", ModificarUsuarioRequest, SimpleResponse),
    (modificar_horarios, "/modificar_horarios", ModificarHorariosRequest, SimpleResponse),
    (bloquear_usuario, "/bloquear_usuario", BloquearUsuarioRequest, SimpleResponse),
    (eliminar_usuario, "/eliminar_usuario", EliminarUsuarioRequest, SimpleResponse),
    (buscar_asesorias, "/buscar_asesorias", BuscarAsesoriasRequest, AsesoriasResponse),
    (eliminar_asesoria, "/eliminar_asesoria", EliminarAsesoriaRequest, SimpleResponse),
}

async fn register_impl(
    pool: web::Data<DbPool>,
    info: web::Json<RegisterRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::usuarios;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;

    web::block(move || {
        conn.transaction(|| {
            let res = usuarios::table
                .filter(usuarios::uid.eq(&info.uid))
                .count()
                .get_result::<i64>(&conn)
                .context("Error de base de datos")?;
            if res > 0 {
                bail!("El identificador ya está registrado");
            }

            let hashed_password = format!("{:x}", Blake2b::digest(info.password.as_bytes()));
            let data = UsuarioData {
                uid: info.uid,
                email: info.email,
                nombre: info.nombre,
                password: hashed_password,
                rol: ROL_ADMINISTRADOR.to_string(),
                foto_perfil: String::new(),
                especialidad: String::new(),
                descripcion: String::new(),
                tecnologias: String::new(),
                linkedin: String::new(),
                github: String::new(),
                twitter: String::new(),
                sitio_web: String::new(),
                bloqueado: false,
            };

            diesel::insert_into(usuarios::table)
                .values(data)
                .execute(&conn)
                .context("Error de base de datos")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn login_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LoginRequest>,
) -> anyhow::Result<LoginResponse> {
    use crate::schema::{sesiones, usuarios};

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    let login_token = web::block(move || {
        conn.transaction(|| {
            let hashed_password = format!("{:x}", Blake2b::digest(info.password.as_bytes()));
            let res = usuarios::table
                .filter(usuarios::uid.eq(&info.uid))
                .filter(usuarios::password.eq(&hashed_password))
                .filter(usuarios::rol.eq(ROL_ADMINISTRADOR))
                .count()
                .get_result::<i64>(&conn)
                .context("Error de base de datos")?;
            if res != 1 {
                bail!("Credenciales incorrectas");
            }

            let semilla = format!("{}:{}", info.uid, Utc::now().timestamp_millis());
            let login_token = format!("{:x}", Blake2b::digest(semilla.as_bytes()));
            let token_data = SesionData {
                token: login_token.clone(),
                uid: info.uid,
                login_time: Utc::now().naive_utc(),
            };
            diesel::insert_into(sesiones::table)
                .values(token_data)
                .execute(&conn)
                .context("Error de base de datos")?;

            Ok(login_token)
        })
    })
    .await?;

    Ok(LoginResponse {
        success: true,
        err: "".to_string(),
        login_token,
    })
}

async fn logout_impl(
    pool: web::Data<DbPool>,
    info: web::Json<LogoutRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::sesiones;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(sesiones::table.filter(sesiones::token.eq(info.login_token)))
            .execute(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}

async fn buscar_usuarios_impl(
    pool: web::Data<DbPool>,
    info: web::Json<BuscarUsuariosRequest>,
) -> anyhow::Result<BuscarUsuariosResponse> {
    use crate::schema::usuarios;

    let info = info.into_inner();
    get_admin_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let nombre_pattern = crate::utils::get_str_pattern_opt(info.nombre);
    let email_pattern = crate::utils::get_str_pattern_opt(info.email);
    let rol_pattern = crate::utils::get_str_pattern_opt(info.rol);
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let lista = web::block(move || {
        usuarios::table
            .filter(usuarios::nombre.like(nombre_pattern))
            .filter(usuarios::email.like(email_pattern))
            .filter(usuarios::rol.like(rol_pattern))
            .order(usuarios::nombre.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<UsuarioData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(BuscarUsuariosResponse {
        success: true,
        err: "".to_string(),
        usuarios: lista
            .into_iter()
            .map(|usuario| PerfilItem::desde_datos(usuario, None))
            .collect(),
    })
}

async fn ver_usuario_impl(
    pool: web::Data<DbPool>,
    info: web::Json<VerUsuarioRequest>,
) -> anyhow::Result<VerUsuarioResponse> {
    use crate::schema::{horarios, usuarios};

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_usuario(&pool, info.uid.clone()).await?;

    let conn = get_db_conn(&pool)?;
    type Cargado = (UsuarioData, Option<HorarioData>);
    let (usuario, horario) = web::block(move || -> Result<Cargado, diesel::result::Error> {
        let usuario = usuarios::table
            .filter(usuarios::uid.eq(&info.uid))
            .get_result::<UsuarioData>(&conn)?;
        let horario = horarios::table
            .filter(horarios::uid.eq(&info.uid))
            .get_result::<HorarioData>(&conn)
            .optional()?;
        Ok((usuario, horario))
    })
    .await
    .context("Error de base de datos")?;

    Ok(VerUsuarioResponse {
        success: true,
        err: "".to_string(),
        usuario: PerfilItem::desde_datos(usuario, horario),
    })
}

async fn modificar_usuario_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarUsuarioRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{horarios, usuarios};

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_usuario(&pool, info.uid.clone()).await?;

    if let Some(rol) = &info.rol {
        if rol != ROL_ADMINISTRADOR && rol != ROL_PROGRAMADOR && rol != ROL_USUARIO {
            bail!("Rol desconocido");
        }
    }

    let sera_programador = info.rol.as_deref() == Some(ROL_PROGRAMADOR);
    let uid = info.uid.clone();
    let data = UpdateUsuario {
        email: info.email,
        nombre: info.nombre,
        rol: info.rol,
        foto_perfil: info.foto_perfil,
        especialidad: info.especialidad,
        descripcion: info.descripcion,
        tecnologias: info
            .tecnologias
            .as_deref()
            .map(crate::utils::lista_a_tecnologias),
        linkedin: info.linkedin,
        github: info.github,
        twitter: info.twitter,
        sitio_web: info.sitio_web,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            diesel::update(usuarios::table.filter(usuarios::uid.eq(&uid)))
                .set(&data)
                .execute(&conn)
                .context("Error de base de datos")?;

            // Al volverse programador la cuenta estrena su horario, todo
            // inactivo hasta que alguien lo edite.
            if sera_programador {
                let existentes = horarios::table
                    .filter(horarios::uid.eq(&uid))
                    .count()
                    .get_result::<i64>(&conn)
                    .context("Error de base de datos")?;
                if existentes == 0 {
                    diesel::insert_into(horarios::table)
                        .values(HorarioData::inactivo(uid.clone()))
                        .execute(&conn)
                        .context("Error de base de datos")?;
                }
            }

            Ok::<(), anyhow::Error>(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn modificar_horarios_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarHorariosRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::horarios;

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_usuario(&pool, info.uid.clone()).await?;

    let franjas = [
        &info.horario_lunes,
        &info.horario_martes,
        &info.horario_miercoles,
        &info.horario_jueves,
        &info.horario_viernes,
        &info.horario_sabado,
        &info.horario_domingo,
    ];
    for franja in franjas.iter() {
        crate::utils::validar_franja(franja)?;
    }

    // La forma general heredada solo puede escribirla el administrador,
    // para reparar datos antiguos; ambas horas van juntas o ninguna.
    let dias_generales = match &info.dias_generales {
        Some(nombres) => {
            let mut dias = Vec::with_capacity(nombres.len());
            for nombre in nombres {
                match Dia::desde_nombre(nombre) {
                    Some(dia) => dias.push(dia.nombre().to_string()),
                    None => bail!("Día desconocido: {}", nombre),
                }
            }
            if dias.is_empty() {
                None
            } else {
                Some(dias.join(","))
            }
        }
        None => None,
    };
    match (&info.hora_inicio, &info.hora_fin) {
        (Some(inicio), Some(fin)) => {
            crate::utils::validar_hora(inicio)?;
            crate::utils::validar_hora(fin)?;
            if inicio > fin {
                bail!("Franja inválida: la hora de inicio es posterior a la de fin");
            }
        }
        (None, None) => {}
        _ => bail!("La hora de inicio y la de fin van juntas"),
    }

    let horario = HorarioSemanal::desde_cadenas([
        &info.horario_lunes,
        &info.horario_martes,
        &info.horario_miercoles,
        &info.horario_jueves,
        &info.horario_viernes,
        &info.horario_sabado,
        &info.horario_domingo,
    ]);
    let [lunes, martes, miercoles, jueves, viernes, sabado, domingo] = horario.a_cadenas();
    let data = HorarioData {
        uid: info.uid.clone(),
        lunes,
        martes,
        miercoles,
        jueves,
        viernes,
        sabado,
        domingo,
        dias_generales,
        hora_inicio: info.hora_inicio.clone(),
        hora_fin: info.hora_fin.clone(),
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::replace_into(horarios::table)
            .values(&data)
            .execute(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}

async fn bloquear_usuario_impl(
    pool: web::Data<DbPool>,
    info: web::Json<BloquearUsuarioRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{sesiones, usuarios};

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_usuario(&pool, info.uid.clone()).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            diesel::update(usuarios::table.filter(usuarios::uid.eq(&info.uid)))
                .set(usuarios::bloqueado.eq(info.bloqueado))
                .execute(&conn)
                .context("Error de base de datos")?;

            // Bloquear también tumba sus sesiones vivas.
            if info.bloqueado {
                diesel::delete(sesiones::table.filter(sesiones::uid.eq(&info.uid)))
                    .execute(&conn)
                    .context("Error de base de datos")?;
            }

            Ok::<(), anyhow::Error>(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn eliminar_usuario_impl(
    pool: web::Data<DbPool>,
    info: web::Json<EliminarUsuarioRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{horarios, sesiones, usuarios};

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_usuario(&pool, info.uid.clone()).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            diesel::delete(usuarios::table.filter(usuarios::uid.eq(&info.uid)))
                .execute(&conn)?;
            diesel::delete(horarios::table.filter(horarios::uid.eq(&info.uid)))
                .execute(&conn)?;
            diesel::delete(sesiones::table.filter(sesiones::uid.eq(&info.uid)))
                .execute(&conn)?;
            Ok::<(), diesel::result::Error>(())
        })
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}

async fn buscar_asesorias_impl(
    pool: web::Data<DbPool>,
    info: web::Json<BuscarAsesoriasRequest>,
) -> anyhow::Result<AsesoriasResponse> {
    use crate::schema::asesorias;

    let info = info.into_inner();
    get_admin_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let estado = info.estado.unwrap_or_else(|| "todos".to_string());
    let lista = web::block(move || {
        asesorias::table
            .filter((asesorias::estado.eq(&estado)).or(&estado == "todos"))
            .order(asesorias::fecha_solicitud.desc())
            .offset(first_index)
            .limit(limit)
            .get_results::<AsesoriaData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(AsesoriasResponse {
        success: true,
        err: "".to_string(),
        asesorias: lista.into_iter().map(AsesoriaItem::from).collect(),
    })
}

async fn eliminar_asesoria_impl(
    pool: web::Data<DbPool>,
    info: web::Json<EliminarAsesoriaRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{asesorias, notificaciones};

    let info = info.into_inner();
    get_admin_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_asesoria(&pool, info.id.clone()).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            diesel::delete(asesorias::table.filter(asesorias::id.eq(&info.id)))
                .execute(&conn)?;
            diesel::delete(
                notificaciones::table.filter(notificaciones::id_asesoria.eq(&info.id)),
            )
            .execute(&conn)?;
            Ok::<(), diesel::result::Error>(())
        })
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}
