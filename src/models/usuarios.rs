use crate::schema::usuarios;

#[derive(Queryable, Insertable, Identifiable)]
#[primary_key(uid)]
#[table_name = "usuarios"]
pub struct UsuarioData {
    pub uid: String,
    pub email: String,
    pub nombre: String,
    pub password: String,
    pub rol: String,
    pub foto_perfil: String,
    pub especialidad: String,
    pub descripcion: String,
    pub tecnologias: String,
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub sitio_web: String,
    pub bloqueado: bool,
}

#[derive(AsChangeset, Default)]
#[table_name = "usuarios"]
pub struct UpdateUsuario {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub foto_perfil: Option<String>,
    pub especialidad: Option<String>,
    pub descripcion: Option<String>,
    pub tecnologias: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub sitio_web: Option<String>,
}

pub const ROL_ADMINISTRADOR: &str = "administrador";
pub const ROL_PROGRAMADOR: &str = "programador";
pub const ROL_USUARIO: &str = "usuario";
