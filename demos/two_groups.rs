use cleave::render::{dendrogram_xml, kmeans_report};
use cleave::{Agglomerative, Dataset, Kmeans, RandomIndices};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two obvious groups in 2D, with a name column that only rides along.
    let input = "\
0,1,1
a,0.0,0.0
b,0.1,0.2
c,0.2,0.1
d,5.0,5.0
e,5.1,4.9
f,4.9,5.1
";
    let data = Dataset::from_reader(input.as_bytes())?;

    let tree = Agglomerative::new().fit(data.points())?;
    if let Some(root) = tree.root() {
        println!("{}", dendrogram_xml(&tree, root));
    }
    for (i, id) in tree.cut(1.0).into_iter().enumerate() {
        let members = tree.node(id).map(|n| n.members().to_vec()).unwrap_or_default();
        println!("cut cluster {i}: records {members:?}");
    }
    println!();

    let fit = Kmeans::new(2).fit(data.points(), RandomIndices::seeded(7))?;
    print!("{}", kmeans_report(&fit, &data));

    Ok(())
}
