use taginject::Inject;

#[derive(Inject)]
struct Service {
    #[inject = 1]
    name: String,
}

fn main() {}
