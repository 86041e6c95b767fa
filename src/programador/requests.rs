use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub uid: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPerfilRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarPerfilRequest {
    pub login_token: String,
    pub nombre: Option<String>,
    pub foto_perfil: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub tecnologias: Option<Vec<String>>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub sitio_web: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarHorariosRequest {
    pub login_token: String,
    pub horario_lunes: String,
    pub horario_martes: String,
    pub horario_miercoles: String,
    pub horario_jueves: String,
    pub horario_viernes: String,
    pub horario_sabado: String,
    pub horario_domingo: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MisAsesoriasRequest {
    pub login_token: String,
    pub estado: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderAsesoriaRequest {
    pub login_token: String,
    pub id: String,
    pub estado: String,
    #[serde(default)]
    pub mensaje_respuesta: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MisProyectosRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearProyectoRequest {
    pub login_token: String,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub participacion: String,
    #[serde(default)]
    pub tecnologias: Vec<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificarProyectoRequest {
    pub login_token: String,
    pub id: String,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub tipo: Option<String>,
    pub participacion: Option<String>,
    pub tecnologias: Option<Vec<String>>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminarProyectoRequest {
    pub login_token: String,
    pub id: String,
}
