use taginject::Inject;

#[derive(Inject)]
struct Service {
    #[inject(skip, "name")]
    name: String,
}

fn main() {}
