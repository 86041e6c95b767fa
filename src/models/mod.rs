pub mod asesorias;
pub mod horarios;
pub mod notificaciones;
pub mod proyectos;
pub mod usuarios;

pub mod sesiones;
