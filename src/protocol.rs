use serde::Serialize;

use crate::models::{
    asesorias::AsesoriaData, horarios::HorarioData, proyectos::ProyectoData,
    usuarios::UsuarioData,
};

#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err<S: ToString>(err: S) -> Self {
                    Self {
                        success: false,
                        err: err.to_string(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
}

/// Una asesoría tal como viaja al frontend, compartida por los tres
/// paneles (usuario, programador, administrador).
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsesoriaItem {
    pub id: String,
    pub id_programador: String,
    pub id_usuario: String,
    pub nombre_usuario: String,
    pub email_usuario: String,
    pub fecha_solicitud: String,
    pub fecha_asesoria: String,
    pub hora_asesoria: String,
    pub motivo: Option<String>,
    pub estado: String,
    pub mensaje_respuesta: Option<String>,
    pub motivo_cancelacion: Option<String>,
    pub fecha_cancelacion: Option<String>,
}

impl From<AsesoriaData> for AsesoriaItem {
    fn from(data: AsesoriaData) -> Self {
        AsesoriaItem {
            id: data.id,
            id_programador: data.id_programador,
            id_usuario: data.id_usuario,
            nombre_usuario: data.nombre_usuario,
            email_usuario: data.email_usuario,
            fecha_solicitud: crate::utils::format_time_str(&data.fecha_solicitud),
            fecha_asesoria: data.fecha_asesoria,
            hora_asesoria: data.hora_asesoria,
            motivo: data.motivo,
            estado: data.estado,
            mensaje_respuesta: data.mensaje_respuesta,
            motivo_cancelacion: data.motivo_cancelacion,
            fecha_cancelacion: data
                .fecha_cancelacion
                .as_ref()
                .map(crate::utils::format_time_str),
        }
    }
}

/// Perfil plano, con la disponibilidad serializada como una cadena
/// "HH:MM-HH:MM" por día más los campos generales heredados.
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfilItem {
    pub uid: String,
    pub email: String,
    pub nombre: String,
    pub rol: String,
    pub foto_perfil: String,
    pub especialidad: String,
    pub descripcion: String,
    pub tecnologias: Vec<String>,
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub sitio_web: String,
    pub bloqueado: bool,
    pub horario_lunes: String,
    pub horario_martes: String,
    pub horario_miercoles: String,
    pub horario_jueves: String,
    pub horario_viernes: String,
    pub horario_sabado: String,
    pub horario_domingo: String,
    pub dias_generales: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fin: Option<String>,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProyectoItem {
    pub id: String,
    pub id_programador: String,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub participacion: String,
    pub tecnologias: Vec<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagen_url: Option<String>,
}

impl From<ProyectoData> for ProyectoItem {
    fn from(data: ProyectoData) -> Self {
        ProyectoItem {
            id: data.id,
            id_programador: data.id_programador,
            nombre: data.nombre,
            descripcion: data.descripcion,
            tipo: data.tipo,
            participacion: data.participacion,
            tecnologias: crate::utils::tecnologias_a_lista(&data.tecnologias),
            repo_url: data.repo_url,
            demo_url: data.demo_url,
            imagen_url: data.imagen_url,
        }
    }
}

impl PerfilItem {
    pub fn desde_datos(usuario: UsuarioData, horario: Option<HorarioData>) -> Self {
        let mut item = PerfilItem {
            uid: usuario.uid,
            email: usuario.email,
            nombre: usuario.nombre,
            rol: usuario.rol,
            foto_perfil: usuario.foto_perfil,
            especialidad: usuario.especialidad,
            descripcion: usuario.descripcion,
            tecnologias: crate::utils::tecnologias_a_lista(&usuario.tecnologias),
            linkedin: usuario.linkedin,
            github: usuario.github,
            twitter: usuario.twitter,
            sitio_web: usuario.sitio_web,
            bloqueado: usuario.bloqueado,
            ..Default::default()
        };

        if let Some(horario) = horario {
            item.horario_lunes = horario.lunes;
            item.horario_martes = horario.martes;
            item.horario_miercoles = horario.miercoles;
            item.horario_jueves = horario.jueves;
            item.horario_viernes = horario.viernes;
            item.horario_sabado = horario.sabado;
            item.horario_domingo = horario.domingo;
            item.dias_generales = horario.dias_generales;
            item.hora_inicio = horario.hora_inicio;
            item.hora_fin = horario.hora_fin;
        }

        item
    }
}
