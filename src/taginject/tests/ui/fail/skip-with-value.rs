use taginject::Inject;

#[derive(Inject)]
struct Service {
    #[inject(skip = "yes")]
    name: String,
}

fn main() {}
