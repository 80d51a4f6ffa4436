use taginject::Inject;

#[derive(Inject)]
struct Service {
    #[inject(custom, custom = "name")]
    name: String,
}

fn main() {}
