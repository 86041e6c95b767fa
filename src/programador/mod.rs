mod requests;
mod responses;
mod utils;

use crate::{
    agenda::HorarioSemanal,
    database::get_db_conn,
    models::{
        asesorias::{AsesoriaData, ESTADO_APROBADA, ESTADO_PENDIENTE, ESTADO_RECHAZADA},
        horarios::HorarioData,
        notificaciones::{NewNotificacion, TIPO_EMAIL},
        proyectos::{ProyectoData, UpdateProyecto},
        sesiones::SesionData,
        usuarios::{UpdateUsuario, UsuarioData, ROL_PROGRAMADOR},
    },
    protocol::{AsesoriaItem, PerfilItem, ProyectoItem, SimpleResponse},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::get_programador_from_token};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(view_perfil)
        .service(modificar_perfil)
        .service(modificar_horarios)
        .service(mis_asesorias)
        .service(responder_asesoria)
        .service(mis_proyectos)
        .service(crear_proyecto)
        .service(modificar_proyecto)
        .service(eliminar_proyecto);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (view_perfil, "/view_perfil", ViewPerfilRequest, PerfilResponse),
    (modificar_perfil, "/modificar_perfil", ModificarPerfilRequest, SimpleResponse),
    (modificar_horarios, "/modificar_horarios", ModificarHorariosRequest, SimpleResponse),
    (mis_asesorias, "/mis_asesorias", MisAsesoriasRequest, AsesoriasResponse),
    (responder_asesoria, "/responder_asesoria", ResponderAsesoriaRequest, SimpleResponse),
    (mis_proyectos, "/mis_proyectos", MisProyectosRequest, ProyectosResponse),
    (crear_proyecto, "/crear_proyecto", CrearProyectoRequest, SimpleResponse),
    (modificar_proyecto, "/modificar_proyecto", ModificarProyectoRequest, SimpleResponse),
    (eliminar_proyecto, "/eliminar_proyecto", EliminarProyectoRequest, SimpleResponse),
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
                .filter(usuarios::rol.eq(ROL_PROGRAMADOR))
                .filter(usuarios::bloqueado.eq(false))
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

async fn view_perfil_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewPerfilRequest>,
) -> anyhow::Result<PerfilResponse> {
    use crate::schema::{horarios, usuarios};

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    type Cargado = (UsuarioData, Option<HorarioData>);
    let (usuario, horario) = web::block(move || -> Result<Cargado, diesel::result::Error> {
        let usuario = usuarios::table
            .filter(usuarios::uid.eq(&uid))
            .get_result::<UsuarioData>(&conn)?;
        let horario = horarios::table
            .filter(horarios::uid.eq(&uid))
            .get_result::<HorarioData>(&conn)
            .optional()?;
        Ok((usuario, horario))
    })
    .await
    .context("Error de base de datos")?;

    Ok(PerfilResponse {
        success: true,
        err: "".to_string(),
        perfil: PerfilItem::desde_datos(usuario, horario),
    })
}

async fn modificar_perfil_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarPerfilRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::usuarios;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

    let data = UpdateUsuario {
        nombre: info.nombre,
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
        ..Default::default()
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(usuarios::table.filter(usuarios::uid.eq(uid)))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}

async fn modificar_horarios_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarHorariosRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::horarios;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

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

    // Guardar la forma por día normalizada desplaza a la forma general
    // heredada, que queda vacía a partir de aquí.
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
        uid,
        lunes,
        martes,
        miercoles,
        jueves,
        viernes,
        sabado,
        domingo,
        dias_generales: None,
        hora_inicio: None,
        hora_fin: None,
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

async fn mis_asesorias_impl(
    pool: web::Data<DbPool>,
    info: web::Json<MisAsesoriasRequest>,
) -> anyhow::Result<AsesoriasResponse> {
    use crate::schema::asesorias;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let estado = info.estado.unwrap_or_else(|| "todos".to_string());
    let lista = web::block(move || {
        asesorias::table
            .filter(asesorias::id_programador.eq(&uid))
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

async fn responder_asesoria_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ResponderAsesoriaRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{asesorias, notificaciones};

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

    if info.estado != ESTADO_APROBADA && info.estado != ESTADO_RECHAZADA {
        bail!("La respuesta debe ser aprobada o rechazada");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            // Releído dentro de la transacción: otra pestaña pudo haber
            // respondido o el usuario cancelado mientras tanto.
            let asesoria = asesorias::table
                .filter(asesorias::id.eq(&info.id))
                .get_result::<AsesoriaData>(&conn)
                .optional()
                .context("Error de base de datos")?;
            let asesoria = match asesoria {
                Some(asesoria) => asesoria,
                None => bail!("La asesoría no existe"),
            };
            if asesoria.id_programador != uid {
                bail!("La asesoría no pertenece a este programador");
            }
            if asesoria.estado != ESTADO_PENDIENTE {
                bail!("La solicitud ya fue respondida");
            }

            diesel::update(asesorias::table.filter(asesorias::id.eq(&info.id)))
                .set((
                    asesorias::estado.eq(&info.estado),
                    asesorias::mensaje_respuesta.eq(info.mensaje_respuesta.clone()),
                ))
                .execute(&conn)
                .context("Error de base de datos")?;

            let aviso = NewNotificacion {
                id_asesoria: asesoria.id,
                destinatario: asesoria.email_usuario,
                asunto: format!("Asesoría {}", info.estado),
                mensaje: format!(
                    "Hola {}, tu solicitud de asesoría para el {} a las {} fue {}.",
                    asesoria.nombre_usuario,
                    asesoria.fecha_asesoria,
                    asesoria.hora_asesoria,
                    info.estado
                ),
                tipo: TIPO_EMAIL.to_string(),
                estado_asesoria: info.estado.clone(),
                creado_en: Utc::now().naive_utc(),
            };
            diesel::insert_into(notificaciones::table)
                .values(aviso)
                .execute(&conn)
                .context("Error de base de datos")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn mis_proyectos_impl(
    pool: web::Data<DbPool>,
    info: web::Json<MisProyectosRequest>,
) -> anyhow::Result<ProyectosResponse> {
    use crate::schema::proyectos;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let lista = web::block(move || {
        proyectos::table
            .filter(proyectos::id_programador.eq(&uid))
            .order(proyectos::nombre.asc())
            .get_results::<ProyectoData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(ProyectosResponse {
        success: true,
        err: "".to_string(),
        proyectos: lista.into_iter().map(ProyectoItem::from).collect(),
    })
}

async fn crear_proyecto_impl(
    pool: web::Data<DbPool>,
    info: web::Json<CrearProyectoRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::proyectos;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

    crate::utils::validar_tipo_proyecto(&info.tipo)?;
    crate::utils::validar_participacion(&info.participacion)?;

    let data = ProyectoData {
        id: format!("PRO{}", Utc::now().timestamp_millis()),
        id_programador: uid,
        nombre: info.nombre,
        descripcion: info.descripcion,
        tipo: info.tipo,
        participacion: info.participacion,
        tecnologias: crate::utils::lista_a_tecnologias(&info.tecnologias),
        repo_url: info.repo_url,
        demo_url: info.demo_url,
        imagen_url: info.imagen_url,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::insert_into(proyectos::table)
            .values(data)
            .execute(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(SimpleResponse::ok())
}

async fn modificar_proyecto_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarProyectoRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::proyectos;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

    if let Some(tipo) = &info.tipo {
        crate::utils::validar_tipo_proyecto(tipo)?;
    }
    if let Some(participacion) = &info.participacion {
        crate::utils::validar_participacion(participacion)?;
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let duenno = proyectos::table
                .filter(proyectos::id.eq(&info.id))
                .filter(proyectos::id_programador.eq(&uid))
                .count()
                .get_result::<i64>(&conn)
                .context("Error de base de datos")?;
            if duenno == 0 {
                bail!("El proyecto no existe o no pertenece a este programador");
            }

            let data = UpdateProyecto {
                nombre: info.nombre,
                descripcion: info.descripcion,
                tipo: info.tipo,
                participacion: info.participacion,
                tecnologias: info
                    .tecnologias
                    .as_deref()
                    .map(crate::utils::lista_a_tecnologias),
                repo_url: info.repo_url,
                demo_url: info.demo_url,
                imagen_url: info.imagen_url,
            };
            diesel::update(proyectos::table.filter(proyectos::id.eq(&info.id)))
                .set(&data)
                .execute(&conn)
                .context("Error de base de datos")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn eliminar_proyecto_impl(
    pool: web::Data<DbPool>,
    info: web::Json<EliminarProyectoRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::proyectos;

    let info = info.into_inner();
    let uid = get_programador_from_token(info.login_token.clone(), &pool).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let duenno = proyectos::table
                .filter(proyectos::id.eq(&info.id))
                .filter(proyectos::id_programador.eq(&uid))
                .count()
                .get_result::<i64>(&conn)
                .context("Error de base de datos")?;
            if duenno == 0 {
                bail!("El proyecto no existe o no pertenece a este programador");
            }

            diesel::delete(proyectos::table.filter(proyectos::id.eq(&info.id)))
                .execute(&conn)
                .context("Error de base de datos")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}
