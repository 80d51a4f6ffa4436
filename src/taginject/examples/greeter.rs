use std::error::Error;
use std::sync::Arc;

use taginject::prelude::*;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut shared = Registry::new();
    shared.install(CommonModule::new("greeter"))?;

    let mut registry = Registry::new();
    registry.set_parent(Arc::new(shared)).install(GreeterModule)?;

    let mut app = App::default();
    registry.apply(&mut app)?;
    app.run();

    registry.invoke_tag(&["chinese"], |greeter: Arc<dyn Greeter>, logger: Arc<dyn Logger>| {
        logger.log("Greeting from an invoked closure:");
        greeter.greet(&*logger);
    })?;

    Ok(())
}

struct CommonModule {
    app_name: &'static str,
}

impl CommonModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for CommonModule {
    fn configure(&self, registry: &mut Registry) -> Result<(), Box<dyn Error + Send + Sync>> {
        registry
            .map_tag(self.app_name, "app_name")
            .map(ConsoleLogger {
                app_name: self.app_name,
            });
        Ok(())
    }
}

struct GreeterModule;

impl Module for GreeterModule {
    fn configure(&self, registry: &mut Registry) -> Result<(), Box<dyn Error + Send + Sync>> {
        registry
            .map_tag(EnglishGreeter, "english")
            .map_tag(ChineseGreeter, "chinese");
        Ok(())
    }
}

trait Logger: Send + Sync + 'static {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: &'static str,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.app_name, message);
    }
}

managed!(ConsoleLogger);
interface!(dyn Logger = [ConsoleLogger]);

trait Greeter: Send + Sync + 'static {
    fn greet(&self, logger: &dyn Logger);
}

struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self, logger: &dyn Logger) {
        logger.log("Hello World!");
    }
}

struct ChineseGreeter;

impl Greeter for ChineseGreeter {
    fn greet(&self, logger: &dyn Logger) {
        logger.log("你好世界!");
    }
}

managed!(EnglishGreeter, ChineseGreeter);
interface!(dyn Greeter = [EnglishGreeter, ChineseGreeter]);

#[derive(Inject)]
struct App {
    #[inject("app_name")]
    name: &'static str,
    logger: Arc<dyn Logger>,
    #[inject("english")]
    english: Arc<dyn Greeter>,
    #[inject("chinese")]
    chinese: Arc<dyn Greeter>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            name: "",
            logger: Arc::new(ConsoleLogger { app_name: "" }),
            english: Arc::new(EnglishGreeter),
            chinese: Arc::new(EnglishGreeter),
        }
    }
}

impl App {
    fn run(&self) {
        self.logger
            .log(&format!("Greeting from {} managed values:", self.name));
        for greeter in [&self.english, &self.chinese] {
            greeter.greet(&*self.logger);
        }
    }
}
