#[macro_use]
extern crate diesel;

mod admin;
mod agenda;
mod database;
mod models;
mod programador;
mod protocol;
mod schema;
mod usuario;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let conn_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not found");
    let manager = ConnectionManager::<MysqlConnection>::new(conn_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Servidor de asesorías escuchando en {}", bind);

    HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .wrap(middleware::Logger::default())
            // usuario (solicitante)
            .service(
                web::scope("/usuario")
                    .configure(usuario::config),
            )
            // programador
            .service(
                web::scope("/programador")
                    .configure(programador::config),
            )
            // administrador
            .service(
                web::scope("/admin")
                    .configure(admin::config),
            )
    })
    .bind(bind)?
    .run()
    .await
}
