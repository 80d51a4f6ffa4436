use taginject::Inject;

#[derive(Inject)]
struct Service {
    #[inject("name")]
    #[inject]
    name: String,
}

fn main() {}
