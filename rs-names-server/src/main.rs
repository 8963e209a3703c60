use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use serde::{Deserialize, Serialize};

use rs_names_core::{GeneratorConfig, LstmModel, NameGenerator};

mod config;

use config::ServerConfig;

type SharedGenerator = NameGenerator<LstmModel>;

/// Query parameters of the `/name` endpoint
#[derive(Deserialize)]
struct NameQuery {
	race: String,
	gender: String,
}

#[derive(Serialize)]
struct NameResponse {
	name: String,
}

/// HTTP GET endpoint `/name`
///
/// Generates one full name for the requested race and gender.
/// Unknown race or gender -> 400, model failure -> 500.
#[get("/name")]
async fn get_name(data: web::Data<SharedGenerator>, query: web::Query<NameQuery>) -> impl Responder {
	let NameQuery { race, gender } = query.into_inner();
	let generator = data.clone();

	let result = match web::block(move || generator.generate(1, &race, &gender)).await {
		Ok(result) => result,
		Err(e) => {
			log::error!("Generation task failed: {e}");
			return HttpResponse::InternalServerError().body("Generation task failed");
		}
	};

	match result {
		Ok(names) => match names.first() {
			Some(pair) => HttpResponse::Ok().json(NameResponse { name: pair.full_name() }),
			None => HttpResponse::InternalServerError().body("No name generated"),
		},
		Err(e) if e.is_client_error() => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => {
			log::error!("Name generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

#[get("/races")]
async fn get_races(data: web::Data<SharedGenerator>) -> impl Responder {
	HttpResponse::Ok().json(data.sampler().races().labels())
}

#[get("/groups")]
async fn get_groups(data: web::Data<SharedGenerator>) -> impl Responder {
	HttpResponse::Ok().json(data.sampler().groups().labels())
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_name).service(get_races).service(get_groups);
}

/// Main entry point for the server.
///
/// Loads the model once and shares it read-only between workers: every
/// request samples with its own recurrent state, so no lock is needed.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env()?;
	let model = LstmModel::load(&config.model_path)?;
	let generator = NameGenerator::with_config(model, GeneratorConfig { max_length: config.max_length })?;
	let shared_generator = web::Data::new(generator);

	log::info!("Serving names on {}:{} with {} workers", config.host, config.port, config.workers);
	HttpServer::new(move || {
		let cors = Cors::default().allow_any_origin().allowed_methods(vec!["GET"]).max_age(3600);
		App::new()
			.wrap(Logger::default())
			.wrap(cors)
			.app_data(shared_generator.clone())
			.configure(routes)
	})
	.workers(config.workers)
	.bind((config.host.as_str(), config.port))?
	.run()
	.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use actix_web::{http::StatusCode, test};
	use rs_names_core::encoding::Vocabulary;
	use rs_names_core::model::lstm::{Linear, LstmLayer};

	use super::*;

	/// Untrained model whose head always picks `'r'`.
	fn generator() -> SharedGenerator {
		let vocab = Vocabulary::new();
		let mut bias = vec![-1000.0; vocab.size()];
		bias[vocab.encode('r').unwrap()] = 0.0;
		let head = Linear::new(2, vocab.size(), vec![0.0; 2 * vocab.size()], bias).unwrap();
		let model = LstmModel::new(vec![LstmLayer::zeros(vocab.size() + 9, 2)], head).unwrap();
		NameGenerator::with_config(model, GeneratorConfig { max_length: 3 }).unwrap()
	}

	#[actix_web::test]
	async fn name_endpoint_returns_json_name() {
		let app = test::init_service(App::new().app_data(web::Data::new(generator())).configure(routes)).await;
		let req = test::TestRequest::get().uri("/name?race=orc&gender=male").to_request();
		let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

		let name = body["name"].as_str().unwrap();
		let parts: Vec<&str> = name.split(' ').collect();
		assert_eq!(parts.len(), 2);
		assert!(parts.iter().all(|p| p.len() == 3 && p.ends_with("rr")));
	}

	#[actix_web::test]
	async fn unknown_race_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(web::Data::new(generator())).configure(routes)).await;
		let req = test::TestRequest::get().uri("/name?race=dragon&gender=male").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn missing_parameters_are_rejected() {
		let app = test::init_service(App::new().app_data(web::Data::new(generator())).configure(routes)).await;
		let req = test::TestRequest::get().uri("/name?race=orc").to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_client_error());
	}

	#[actix_web::test]
	async fn lists_categories() {
		let app = test::init_service(App::new().app_data(web::Data::new(generator())).configure(routes)).await;
		let req = test::TestRequest::get().uri("/groups").to_request();
		let groups: Vec<String> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(groups, vec!["male", "female", "last"]);

		let req = test::TestRequest::get().uri("/races").to_request();
		let races: Vec<String> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(races.len(), 6);
	}
}
