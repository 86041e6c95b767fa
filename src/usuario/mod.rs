mod requests;
mod responses;
mod utils;

use crate::{
    agenda,
    database::{assert, get_db_conn},
    models::{
        asesorias::{AsesoriaData, NewAsesoria, ESTADO_CANCELADA, ESTADO_PENDIENTE},
        horarios::HorarioData,
        notificaciones::{NewNotificacion, TIPO_EMAIL},
        proyectos::ProyectoData,
        sesiones::SesionData,
        usuarios::{UpdateUsuario, UsuarioData, ROL_PROGRAMADOR, ROL_USUARIO},
    },
    protocol::{AsesoriaItem, PerfilItem, ProyectoItem, SimpleResponse},
    DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*, utils::get_usuario_from_token};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(view_perfil)
        .service(modificar_perfil)
        .service(buscar_programadores)
        .service(ver_programador)
        .service(ver_proyectos)
        .service(solicitar_asesoria)
        .service(cancelar_asesoria)
        .service(mis_asesorias);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, SimpleResponse),
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
    (view_perfil, "/view_perfil", ViewPerfilRequest, PerfilResponse),
    (modificar_perfil, "/modificar_perfil", ModificarPerfilRequest, SimpleResponse),
    (buscar_programadores, "/buscar_programadores", BuscarProgramadoresRequest, BuscarProgramadoresResponse),
    (ver_programador, "/ver_programador", VerProgramadorRequest, VerProgramadorResponse),
    (ver_proyectos, "/ver_proyectos", VerProyectosRequest, VerProyectosResponse),
    (solicitar_asesoria, "/solicitar_asesoria", SolicitarAsesoriaRequest, SimpleResponse),
    (cancelar_asesoria, "/cancelar_asesoria", CancelarAsesoriaRequest, SimpleResponse),
    (mis_asesorias, "/mis_asesorias", MisAsesoriasRequest, AsesoriasResponse),
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
                rol: ROL_USUARIO.to_string(),
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
                .filter(usuarios::rol.eq(ROL_USUARIO))
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
    use crate::schema::usuarios;

    let info = info.into_inner();
    let uid = get_usuario_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let usuario = web::block(move || {
        usuarios::table
            .filter(usuarios::uid.eq(&uid))
            .get_result::<UsuarioData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(PerfilResponse {
        success: true,
        err: "".to_string(),
        perfil: PerfilItem::desde_datos(usuario, None),
    })
}

async fn modificar_perfil_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModificarPerfilRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::usuarios;

    let info = info.into_inner();
    let uid = get_usuario_from_token(info.login_token.clone(), &pool).await?;

    let data = UpdateUsuario {
        nombre: info.nombre,
        foto_perfil: info.foto_perfil,
        descripcion: info.descripcion,
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

async fn buscar_programadores_impl(
    pool: web::Data<DbPool>,
    info: web::Json<BuscarProgramadoresRequest>,
) -> anyhow::Result<BuscarProgramadoresResponse> {
    use crate::schema::usuarios;

    let info = info.into_inner();

    let conn = get_db_conn(&pool)?;
    let nombre_pattern = crate::utils::get_str_pattern_opt(info.nombre);
    let especialidad_pattern = crate::utils::get_str_pattern_opt(info.especialidad);
    let tecnologia_pattern = crate::utils::get_str_pattern_opt(info.tecnologia);
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let programadores = web::block(move || {
        usuarios::table
            .filter(usuarios::rol.eq(ROL_PROGRAMADOR))
            .filter(usuarios::bloqueado.eq(false))
            .filter(usuarios::nombre.like(nombre_pattern))
            .filter(usuarios::especialidad.like(especialidad_pattern))
            .filter(usuarios::tecnologias.like(tecnologia_pattern))
            .order(usuarios::nombre.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<UsuarioData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    let programadores = programadores
        .into_iter()
        .map(|data| ProgramadorItem {
            uid: data.uid,
            nombre: data.nombre,
            email: data.email,
            foto_perfil: data.foto_perfil,
            especialidad: data.especialidad,
            descripcion: data.descripcion,
            tecnologias: crate::utils::tecnologias_a_lista(&data.tecnologias),
        })
        .collect();

    Ok(BuscarProgramadoresResponse {
        success: true,
        err: "".to_string(),
        programadores,
    })
}

async fn ver_programador_impl(
    pool: web::Data<DbPool>,
    info: web::Json<VerProgramadorRequest>,
) -> anyhow::Result<VerProgramadorResponse> {
    use crate::schema::{horarios, usuarios};

    let info = info.into_inner();
    assert::assert_programador(&pool, info.id_programador.clone()).await?;

    let conn = get_db_conn(&pool)?;
    type Cargado = (UsuarioData, Option<HorarioData>);
    let (usuario, horario) = web::block(move || -> Result<Cargado, diesel::result::Error> {
        let usuario = usuarios::table
            .filter(usuarios::uid.eq(&info.id_programador))
            .get_result::<UsuarioData>(&conn)?;
        let horario = horarios::table
            .filter(horarios::uid.eq(&info.id_programador))
            .get_result::<HorarioData>(&conn)
            .optional()?;
        Ok((usuario, horario))
    })
    .await
    .context("Error de base de datos")?;

    Ok(VerProgramadorResponse {
        success: true,
        err: "".to_string(),
        programador: PerfilItem::desde_datos(usuario, horario),
    })
}

async fn ver_proyectos_impl(
    pool: web::Data<DbPool>,
    info: web::Json<VerProyectosRequest>,
) -> anyhow::Result<VerProyectosResponse> {
    use crate::schema::proyectos;

    let info = info.into_inner();

    let conn = get_db_conn(&pool)?;
    let proyectos = web::block(move || {
        proyectos::table
            .filter(proyectos::id_programador.eq(&info.id_programador))
            .order(proyectos::nombre.asc())
            .get_results::<ProyectoData>(&conn)
    })
    .await
    .context("Error de base de datos")?;

    Ok(VerProyectosResponse {
        success: true,
        err: "".to_string(),
        proyectos: proyectos.into_iter().map(ProyectoItem::from).collect(),
    })
}

async fn solicitar_asesoria_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SolicitarAsesoriaRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{asesorias, horarios, notificaciones, usuarios};

    let info = info.into_inner();
    let uid = get_usuario_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_programador(&pool, info.id_programador.clone()).await?;

    let fecha = crate::utils::validar_fecha(&info.fecha_asesoria)?;
    crate::utils::validar_hora(&info.hora_asesoria)?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            // La disponibilidad se resuelve una sola vez aquí, en el
            // borde de datos; el motor solo ve la forma canónica.
            let horario = horarios::table
                .filter(horarios::uid.eq(&info.id_programador))
                .get_result::<HorarioData>(&conn)
                .optional()
                .context("Error de base de datos")?;
            let disponibilidad = horario.map(|horario| horario.disponibilidad());

            let decision =
                agenda::puede_agendar(disponibilidad.as_ref(), fecha, &info.hora_asesoria);
            if !decision.permitido {
                bail!(decision
                    .razon
                    .unwrap_or_else(|| "Horario no disponible".to_string()));
            }

            // Conflicto: ya hay una asesoría viva en esa fecha y hora.
            let ocupadas = asesorias::table
                .filter(asesorias::id_programador.eq(&info.id_programador))
                .filter(asesorias::fecha_asesoria.eq(&info.fecha_asesoria))
                .filter(asesorias::hora_asesoria.eq(&info.hora_asesoria))
                .filter(asesorias::estado.ne(ESTADO_CANCELADA))
                .count()
                .get_result::<i64>(&conn)
                .context("Error de base de datos")?;
            if ocupadas > 0 {
                bail!("Ya existe una asesoría agendada en ese horario");
            }

            let solicitante = usuarios::table
                .filter(usuarios::uid.eq(&uid))
                .get_result::<UsuarioData>(&conn)
                .context("Error de base de datos")?;
            let programador = usuarios::table
                .filter(usuarios::uid.eq(&info.id_programador))
                .get_result::<UsuarioData>(&conn)
                .context("Error de base de datos")?;

            let ahora = Utc::now().naive_utc();
            let id = format!("ASE{}", ahora.timestamp_millis());
            let data = NewAsesoria {
                id: id.clone(),
                id_programador: info.id_programador,
                id_usuario: uid,
                nombre_usuario: solicitante.nombre.clone(),
                email_usuario: solicitante.email,
                fecha_solicitud: ahora,
                fecha_asesoria: info.fecha_asesoria.clone(),
                hora_asesoria: info.hora_asesoria.clone(),
                motivo: info.motivo,
                estado: ESTADO_PENDIENTE.to_string(),
            };
            diesel::insert_into(asesorias::table)
                .values(data)
                .execute(&conn)
                .context("Error de base de datos")?;

            let aviso = NewNotificacion {
                id_asesoria: id,
                destinatario: programador.email,
                asunto: "Nueva solicitud de asesoría".to_string(),
                mensaje: format!(
                    "Hola {}, tienes una nueva solicitud de asesoría de {} para el {} a las {}.",
                    programador.nombre,
                    solicitante.nombre,
                    info.fecha_asesoria,
                    info.hora_asesoria
                ),
                tipo: TIPO_EMAIL.to_string(),
                estado_asesoria: ESTADO_PENDIENTE.to_string(),
                creado_en: ahora,
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

async fn cancelar_asesoria_impl(
    pool: web::Data<DbPool>,
    info: web::Json<CancelarAsesoriaRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{asesorias, notificaciones, usuarios};

    let info = info.into_inner();
    let uid = get_usuario_from_token(info.login_token.clone(), &pool).await?;
    assert::assert_asesoria(&pool, info.id.clone()).await?;

    let ahora = Utc::now().naive_utc();
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            // Se relee dentro de la transacción: el estado pudo cambiar
            // entre la vista del usuario y este momento.
            let asesoria = asesorias::table
                .filter(asesorias::id.eq(&info.id))
                .get_result::<AsesoriaData>(&conn)
                .context("Error de base de datos")?;
            if asesoria.id_usuario != uid {
                bail!("La asesoría no pertenece a este usuario");
            }

            let decision = agenda::puede_cancelar(
                &asesoria.estado,
                &asesoria.fecha_asesoria,
                &asesoria.hora_asesoria,
                ahora,
            )?;
            if !decision.permitido {
                bail!(decision
                    .razon
                    .unwrap_or_else(|| "No puedes cancelar esta asesoría".to_string()));
            }

            let motivo = match info.motivo_cancelacion {
                Some(motivo) if !motivo.trim().is_empty() => motivo,
                _ => {
                    if agenda::requiere_motivo_cancelacion(&asesoria.estado) {
                        bail!("Debes proporcionar un motivo para cancelar");
                    }
                    "Cancelado por el usuario".to_string()
                }
            };

            diesel::update(asesorias::table.filter(asesorias::id.eq(&info.id)))
                .set((
                    asesorias::estado.eq(ESTADO_CANCELADA),
                    asesorias::motivo_cancelacion.eq(Some(motivo)),
                    asesorias::fecha_cancelacion.eq(Some(ahora)),
                ))
                .execute(&conn)
                .context("Error de base de datos")?;

            let programador = usuarios::table
                .filter(usuarios::uid.eq(&asesoria.id_programador))
                .get_result::<UsuarioData>(&conn)
                .context("Error de base de datos")?;

            let aviso = NewNotificacion {
                id_asesoria: asesoria.id,
                destinatario: programador.email,
                asunto: "Asesoría cancelada".to_string(),
                mensaje: format!(
                    "Hola {}, {} canceló la asesoría del {} a las {}.",
                    programador.nombre,
                    asesoria.nombre_usuario,
                    asesoria.fecha_asesoria,
                    asesoria.hora_asesoria
                ),
                tipo: TIPO_EMAIL.to_string(),
                estado_asesoria: ESTADO_CANCELADA.to_string(),
                creado_en: ahora,
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

async fn mis_asesorias_impl(
    pool: web::Data<DbPool>,
    info: web::Json<MisAsesoriasRequest>,
) -> anyhow::Result<AsesoriasResponse> {
    use crate::schema::asesorias;

    let info = info.into_inner();
    let uid = get_usuario_from_token(info.login_token, &pool).await?;

    let conn = get_db_conn(&pool)?;
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(30).max(0);
    let estado = info.estado.unwrap_or_else(|| "todos".to_string());
    let lista = web::block(move || {
        asesorias::table
            .filter(asesorias::id_usuario.eq(&uid))
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
