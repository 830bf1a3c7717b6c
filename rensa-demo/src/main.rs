use rensa_core::error::Error;
use rensa_core::markov::Markov;
use rensa_core::tokenizer::WhitespaceTokenizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A chain over pre-segmented text; no MeCab install needed for the demo.
    let mut markov = Markov::new(WhitespaceTokenizer);

    // Generating before anything was learned is a real error, not an
    // empty string.
    match markov.generate_sentence() {
        Ok(_) => println!("Should not happen"),
        Err(Error::EmptyModel) => println!("An untrained chain refuses to generate"),
        Err(e) => return Err(e.into()),
    }

    // One sentence per line, tokens separated by spaces: the shape a
    // word-dividing tokenizer (`mecab -Owakati`) produces.
    markov.learn(
        "吾輩 は 猫 で ある 。\n\
         名前 は まだ 無い 。\n\
         吾輩 は ここ で 始め て 人間 という もの を 見 た 。\n\
         人間 という もの は 猫 を 飼う 。",
    )?;
    println!("Learned {} triplets", markov.store().len());

    // Sentences are token walks joined with no separator, so the output
    // reads naturally for Japanese.
    for (i, sentence) in markov.generate(5)?.iter().enumerate() {
        println!("Generated sentence {}: {}", i + 1, sentence);
    }

    // Snapshots are plain JSON and round-trip losslessly.
    let snapshot = markov.to_snapshot()?;
    let mut copy = Markov::new(WhitespaceTokenizer);
    copy.load_snapshot(&snapshot)?;
    println!("Snapshot carries {} triplets", copy.store().len());

    // Malformed input is rejected; the chain keeps its current state.
    match copy.load_snapshot("definitely not a snapshot") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }
    println!("Copy still has {} triplets", copy.store().len());

    // Forgetting removes every triplet that mentions a word.
    let removed = markov.forget("吾輩 名前 人間")?;
    println!("Forgot {removed} triplets");

    // All sentence openers mentioned one of those words, so the chain is
    // unable to start a sentence again.
    match markov.generate_sentence() {
        Ok(_) => println!("Should not happen"),
        Err(Error::EmptyModel) => println!("Every opener was forgotten; back to square one"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
